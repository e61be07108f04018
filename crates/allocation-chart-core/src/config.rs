use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use crate::error::ChartError;
use crate::gradient::GradientStyle;
use crate::types::Radians;
use crate::ChartResult;

/// Side length of the square design viewport.
pub const SVG_SIZE: f64 = 320.0;
/// Center of the viewport on both axes.
pub const CENTER: f64 = SVG_SIZE / 2.0;
/// Radius of the outer donut ring.
pub const OUTER_RADIUS: f64 = 115.0;
/// Donut hole size as a fraction of the outer radius.
pub const INNER_RADIUS_RATIO: f64 = 0.62;
/// 12 o'clock.
pub const START_ANGLE: Radians = -FRAC_PI_2;
/// Radial distance from the rim to the leader line elbow.
pub const ELBOW_EXTENSION: f64 = 12.0;
/// Length of the horizontal leader line segment.
pub const HORIZONTAL_OFFSET: f64 = 32.0;
/// Gap between the end of the leader line and the label text.
pub const LABEL_PADDING: f64 = 8.0;
/// Decimal places used when serializing path coordinates.
pub const PATH_PRECISION: usize = 3;

const MAX_PRECISION: usize = 6;

/// Layout parameters for the donut chart. Every field is optional when
/// deserializing; missing fields take the design defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub svg_size: f64,
    pub outer_radius: f64,
    pub inner_radius_ratio: f64,
    /// Angle at which the first slice begins, in radians.
    pub start_angle: Radians,
    pub elbow_extension: f64,
    pub horizontal_offset: f64,
    pub label_padding: f64,
    /// Decimal places for path coordinates.
    pub precision: usize,
    pub gradient: GradientStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            svg_size: SVG_SIZE,
            outer_radius: OUTER_RADIUS,
            inner_radius_ratio: INNER_RADIUS_RATIO,
            start_angle: START_ANGLE,
            elbow_extension: ELBOW_EXTENSION,
            horizontal_offset: HORIZONTAL_OFFSET,
            label_padding: LABEL_PADDING,
            precision: PATH_PRECISION,
            gradient: GradientStyle::default(),
        }
    }
}

impl ChartConfig {
    pub fn center(&self) -> f64 {
        self.svg_size / 2.0
    }

    pub fn inner_radius(&self) -> f64 {
        self.outer_radius * self.inner_radius_ratio
    }

    /// Radius of the circle the leader line elbows sit on.
    pub fn elbow_radius(&self) -> f64 {
        self.outer_radius + self.elbow_extension
    }

    pub fn validate(&self) -> ChartResult<()> {
        let finite = [
            ("svg_size", self.svg_size),
            ("outer_radius", self.outer_radius),
            ("inner_radius_ratio", self.inner_radius_ratio),
            ("start_angle", self.start_angle),
            ("elbow_extension", self.elbow_extension),
            ("horizontal_offset", self.horizontal_offset),
            ("label_padding", self.label_padding),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, "Must be a finite number"));
            }
        }

        if self.svg_size <= 0.0 {
            return Err(invalid("svg_size", "Must be positive"));
        }
        if self.outer_radius <= 0.0 {
            return Err(invalid("outer_radius", "Must be positive"));
        }
        if self.outer_radius > self.center() {
            return Err(invalid(
                "outer_radius",
                "Must fit inside the viewport (at most svg_size / 2)",
            ));
        }
        if !(0.0..1.0).contains(&self.inner_radius_ratio) {
            return Err(invalid(
                "inner_radius_ratio",
                "Must be in [0, 1) so the hole is smaller than the ring",
            ));
        }
        if self.elbow_extension < 0.0 {
            return Err(invalid("elbow_extension", "Must not be negative"));
        }
        if self.horizontal_offset < 0.0 {
            return Err(invalid("horizontal_offset", "Must not be negative"));
        }
        if self.label_padding < 0.0 {
            return Err(invalid("label_padding", "Must not be negative"));
        }
        if self.precision > MAX_PRECISION {
            return Err(invalid(
                "precision",
                &format!("At most {MAX_PRECISION} decimal places"),
            ));
        }

        self.gradient.validate()
    }
}

fn invalid(field: &str, reason: &str) -> ChartError {
    ChartError::InvalidConfig {
        field: field.into(),
        reason: reason.into(),
    }
}
