use serde::{Deserialize, Serialize};

use super::angle::{gradient_vector, GradientAngleTable};
use crate::allocation::AllocationDatum;
use crate::error::ChartError;
use crate::types::Degrees;
use crate::ChartResult;

/// Stop offsets, in percent, of the highlight overlay.
pub const STOP_OFFSETS: [f64; 4] = [0.0, 3.62, 96.98, 100.0];

/// Colors of the translucent highlight laid over every slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientStyle {
    pub from_color: String,
    pub to_color: String,
    /// Opacity at the 0% and 100% stops
    pub edge_opacity: f64,
    /// Opacity at the two inner stops
    pub inner_opacity: f64,
}

impl Default for GradientStyle {
    fn default() -> Self {
        Self {
            from_color: "#FFFFFF".into(),
            to_color: "#000000".into(),
            edge_opacity: 0.32,
            inner_opacity: 0.08,
        }
    }
}

impl GradientStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for (field, color) in [
            ("gradient.from_color", &self.from_color),
            ("gradient.to_color", &self.to_color),
        ] {
            if color.trim().is_empty() {
                return Err(ChartError::InvalidConfig {
                    field: field.into(),
                    reason: "Must not be blank".into(),
                });
            }
        }
        for (field, opacity) in [
            ("gradient.edge_opacity", self.edge_opacity),
            ("gradient.inner_opacity", self.inner_opacity),
        ] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(ChartError::InvalidConfig {
                    field: field.into(),
                    reason: "Must be between 0 and 1".into(),
                });
            }
        }
        Ok(())
    }

    /// The four stops: edge and inner of `from_color`, then inner and edge
    /// of `to_color`.
    pub fn stops(&self) -> Vec<GradientStop> {
        let colors = [&self.from_color, &self.from_color, &self.to_color, &self.to_color];
        let opacities = [
            self.edge_opacity,
            self.inner_opacity,
            self.inner_opacity,
            self.edge_opacity,
        ];
        STOP_OFFSETS
            .iter()
            .zip(colors)
            .zip(opacities)
            .map(|((offset, color), opacity)| GradientStop {
                offset: *offset,
                color: color.clone(),
                opacity,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Percent along the gradient vector, 0 to 100
    pub offset: f64,
    pub color: String,
    pub opacity: f64,
}

/// A linear gradient overlay for one slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientDef {
    /// Element id, unique within one chart
    pub id: String,
    pub slice_id: String,
    pub angle: Degrees,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stops: Vec<GradientStop>,
}

/// Gradient for the datum at `index`.
pub fn gradient_def(
    index: usize,
    datum: &AllocationDatum,
    angles: &GradientAngleTable,
    style: &GradientStyle,
) -> GradientDef {
    let angle = angles.angle_for(&datum.id);
    let v = gradient_vector(angle);
    GradientDef {
        id: format!("gradient-{index}-{}", slug(&datum.id)),
        slice_id: datum.id.clone(),
        angle,
        x1: v.x1,
        y1: v.y1,
        x2: v.x2,
        y2: v.y2,
        stops: style.stops(),
    }
}

pub fn build_gradients(
    data: &[AllocationDatum],
    angles: &GradientAngleTable,
    style: &GradientStyle,
) -> Vec<GradientDef> {
    data.iter()
        .enumerate()
        .map(|(i, datum)| gradient_def(i, datum, angles, style))
        .collect()
}

/// Lowercase ASCII alphanumerics, everything else folded to '-'.
fn slug(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
