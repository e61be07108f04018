pub mod chart;
pub mod gradient;
