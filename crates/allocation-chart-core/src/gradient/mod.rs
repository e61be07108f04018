//! Per-slice highlight gradients: label → CSS angle lookup and conversion
//! to SVG gradient vectors.

pub mod angle;
pub mod defs;

pub use angle::{gradient_vector, GradientAngleTable, GradientVector};
pub use defs::{build_gradients, gradient_def, GradientDef, GradientStop, GradientStyle};
