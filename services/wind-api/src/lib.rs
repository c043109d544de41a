//! Wind API Service Library
//!
//! HTTP surface for the wind grid pipeline: request handlers, error
//! mapping, router construction and command-line configuration.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
