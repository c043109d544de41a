//! HTTP request handlers for the Wind API.

pub mod health;
pub mod wind_grid;
