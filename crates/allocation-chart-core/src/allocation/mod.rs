//! Normalization of raw allocation slices into chart data.

pub mod aggregate;
pub mod format;
pub mod slice;

pub use aggregate::{aggregate, Aggregation};
pub use slice::{AllocationDatum, AllocationSlice};
