//! Wind grid sampling pipeline.
//!
//! Turns a bounding box into a dense grid of wind speed estimates:
//! - [`planner`] derives a resource-bounded set of sample points
//! - [`fetcher`] queries the forecast provider for a single point
//! - [`executor`] fans point queries out under a connection cap and deadline
//! - [`aggregator`] builds the grid, imputes failed cells and computes stats
//! - [`service`] wires the stages together for one request

pub mod aggregator;
pub mod config;
pub mod executor;
pub mod fetcher;
pub mod limits;
pub mod planner;
pub mod service;

pub use aggregator::{aggregate, GridStats, WindGrid};
pub use config::{CorsConfig, ProviderConfig, ServiceConfig};
pub use executor::{FanOutExecutor, SampleOutcome};
pub use fetcher::{FetchError, OpenMeteoFetcher, PointFetcher};
pub use planner::{plan, GridSpec, SamplePlan, SamplePoint};
pub use service::{GridMeta, WindGridRequest, WindGridResponse, WindGridService};
