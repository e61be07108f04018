use serde::{Deserialize, Serialize};

use super::path::fmt_coord;
use super::polar::Projector;
use crate::config::ChartConfig;
use crate::types::{Point, Radians};

/// Horizontal text alignment of a slice label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    /// Label sits right of the chart; text grows rightwards.
    Start,
    /// Label sits left of the chart; text grows leftwards.
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::End => "end",
        }
    }
}

/// Three-point leader line from the donut rim to an external label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorGeometry {
    pub start_x: f64,
    pub start_y: f64,
    pub elbow_x: f64,
    pub elbow_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub text_anchor: TextAnchor,
    pub label_x: f64,
    pub label_y: f64,
}

impl ConnectorGeometry {
    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn elbow(&self) -> Point {
        Point::new(self.elbow_x, self.elbow_y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    pub fn is_right_side(&self) -> bool {
        self.text_anchor == TextAnchor::Start
    }

    /// `points` attribute for an SVG polyline: start, elbow, end.
    pub fn polyline_points(&self, precision: usize) -> String {
        [self.start(), self.elbow(), self.end()]
            .iter()
            .map(|p| format!("{},{}", fmt_coord(p.x, precision), fmt_coord(p.y, precision)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Place the leader line and label anchor for a slice whose angular
/// bisector is `mid_angle`.
///
/// The line leaves the rim radially, bends at `outer_radius +
/// elbow_extension`, then runs horizontally away from the chart. The side
/// is decided by the sign of `cos(mid_angle)`; zero counts as the right.
pub fn place_connector(
    mid_angle: Radians,
    projector: &Projector,
    config: &ChartConfig,
) -> ConnectorGeometry {
    let start = projector.project(config.outer_radius, mid_angle);
    let elbow = projector.project(config.elbow_radius(), mid_angle);

    let is_right_side = mid_angle.cos() >= 0.0;
    let direction = if is_right_side { 1.0 } else { -1.0 };

    let end_x = elbow.x + direction * config.horizontal_offset;
    let end_y = elbow.y;

    ConnectorGeometry {
        start_x: start.x,
        start_y: start.y,
        elbow_x: elbow.x,
        elbow_y: elbow.y,
        end_x,
        end_y,
        text_anchor: if is_right_side {
            TextAnchor::Start
        } else {
            TextAnchor::End
        },
        label_x: end_x + direction * config.label_padding,
        label_y: end_y,
    }
}
