//! Shared test utilities for the wind-grid workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Bounding box and request fixtures
//! - Open-Meteo payload generators
//! - A local stub of the forecast provider
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, spawn_stub_provider, StubResponse};
//! ```

pub mod fixtures;
pub mod generators;
pub mod provider;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use provider::*;

/// Assert two floats are within `1e-9` (or a given tolerance) of each other.
///
/// # Usage
///
/// ```
/// use test_utils::assert_close;
///
/// assert_close!(0.1 + 0.2, 0.3);
/// assert_close!(6.667, 20.0 / 3.0, 1e-3);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr) => {
        $crate::assert_close!($left, $right, 1e-9)
    };
    ($left:expr, $right:expr, $tol:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() <= $tol,
            "assertion failed: {} is not within {} of {}",
            left,
            $tol,
            right
        );
    }};
}
