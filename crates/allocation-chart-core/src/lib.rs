pub mod allocation;
pub mod chart;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod types;

#[cfg(feature = "svg")]
pub mod render;

pub use chart::{build_chart, compute_allocation_chart, AllocationChart, AllocationInput};
pub use config::ChartConfig;
pub use error::ChartError;
pub use types::*;

/// Standard result type for all allocation chart operations
pub type ChartResult<T> = Result<T, ChartError>;
