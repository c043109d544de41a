//! Common types shared across the wind grid crates and services.

pub mod bbox;
pub mod error;

pub use bbox::BoundingBox;
pub use error::{WindGridError, WindGridResult};
