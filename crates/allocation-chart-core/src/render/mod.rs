//! Standalone SVG rendering of a computed chart.

pub mod svg;

pub use svg::{render_allocation_svg, render_svg, RenderOptions, SvgRequest};
