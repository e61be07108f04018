use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

use super::connector::{place_connector, ConnectorGeometry};
use super::path::PathBuilder;
use super::polar::Projector;
use crate::allocation::{AllocationDatum, Aggregation};
use crate::config::ChartConfig;
use crate::types::Radians;

/// Slices within this distance of a full turn are drawn as a closed ring.
const FULL_CIRCLE_EPSILON: f64 = 1e-9;

/// Angular extent of one slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceLayout {
    pub start_angle: Radians,
    pub end_angle: Radians,
    pub slice_angle: Radians,
    pub mid_angle: Radians,
    pub large_arc: bool,
}

impl SliceLayout {
    fn new(start_angle: Radians, slice_angle: Radians) -> Self {
        Self {
            start_angle,
            end_angle: start_angle + slice_angle,
            slice_angle,
            mid_angle: start_angle + slice_angle / 2.0,
            large_arc: slice_angle > PI,
        }
    }

    pub fn is_full_circle(&self) -> bool {
        self.slice_angle >= TAU - FULL_CIRCLE_EPSILON
    }
}

/// A ready-to-render slice: its datum, angular layout, annular path and
/// label connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceGeometry {
    pub datum: AllocationDatum,
    pub start_angle: Radians,
    pub end_angle: Radians,
    pub slice_angle: Radians,
    pub mid_angle: Radians,
    pub large_arc: bool,
    pub path: String,
    pub connector: ConnectorGeometry,
}

impl SliceGeometry {
    pub fn layout(&self) -> SliceLayout {
        SliceLayout {
            start_angle: self.start_angle,
            end_angle: self.end_angle,
            slice_angle: self.slice_angle,
            mid_angle: self.mid_angle,
            large_arc: self.large_arc,
        }
    }
}

/// Allocate contiguous angles to each share, starting at `start` and
/// sweeping clockwise. Shares are fractions of the whole and should sum
/// to one.
pub fn layout_angles(shares: &[f64], start: Radians) -> Vec<SliceLayout> {
    let mut current = start;
    shares
        .iter()
        .map(|share| {
            let layout = SliceLayout::new(current, share * TAU);
            current = layout.end_angle;
            layout
        })
        .collect()
}

/// SVG path for an annular sector: outer arc clockwise, line inward, inner
/// arc back counter-clockwise, close.
pub fn annular_path(layout: &SliceLayout, projector: &Projector, config: &ChartConfig) -> String {
    let outer = config.outer_radius;
    let inner = config.inner_radius();

    let outer_start = projector.project(outer, layout.start_angle);
    let outer_end = projector.project(outer, layout.end_angle);
    let inner_start = projector.project(inner, layout.start_angle);
    let inner_end = projector.project(inner, layout.end_angle);

    let path = PathBuilder::new(config.precision);

    if layout.is_full_circle() {
        // Coincident arc endpoints draw nothing, so go round in two halves.
        let outer_half = projector.project(outer, layout.start_angle + PI);
        let inner_half = projector.project(inner, layout.start_angle + PI);
        return path
            .move_to(outer_start)
            .arc_to(outer, false, true, outer_half)
            .arc_to(outer, false, true, outer_end)
            .line_to(inner_end)
            .arc_to(inner, false, false, inner_half)
            .arc_to(inner, false, false, inner_start)
            .close()
            .finish();
    }

    path.move_to(outer_start)
        .arc_to(outer, layout.large_arc, true, outer_end)
        .line_to(inner_end)
        .arc_to(inner, layout.large_arc, false, inner_start)
        .close()
        .finish()
}

/// Lay out every datum of the aggregation. Returns an empty list when the
/// total is zero or there is no data.
pub fn build_slices(aggregation: &Aggregation, config: &ChartConfig) -> Vec<SliceGeometry> {
    if aggregation.is_empty() {
        return Vec::new();
    }

    let projector = Projector::new(config.center());
    let shares: Vec<f64> = aggregation.data.iter().map(|d| d.share).collect();
    let layouts = layout_angles(&shares, config.start_angle);

    aggregation
        .data
        .iter()
        .zip(layouts)
        .map(|(datum, layout)| {
            let path = annular_path(&layout, &projector, config);
            let connector = place_connector(layout.mid_angle, &projector, config);
            tracing::debug!(
                id = %datum.id,
                start = layout.start_angle,
                sweep = layout.slice_angle,
                anchor = connector.text_anchor.as_str(),
                "slice laid out"
            );
            SliceGeometry {
                datum: datum.clone(),
                start_angle: layout.start_angle,
                end_angle: layout.end_angle,
                slice_angle: layout.slice_angle,
                mid_angle: layout.mid_angle,
                large_arc: layout.large_arc,
                path,
                connector,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_layout_is_contiguous() {
        let layouts = layout_angles(&[0.25, 0.5, 0.25], -FRAC_PI_2);
        assert_eq!(layouts.len(), 3);
        assert_abs_diff_eq!(layouts[0].start_angle, -FRAC_PI_2);
        for pair in layouts.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
        assert_abs_diff_eq!(layouts[2].end_angle, 1.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_large_arc_flag() {
        let layouts = layout_angles(&[0.5, 0.3, 0.2], 0.0);
        // exactly half a turn is not "more than" π
        assert!(!layouts[0].large_arc);
        let layouts = layout_angles(&[0.6, 0.4], 0.0);
        assert!(layouts[0].large_arc);
        assert!(!layouts[1].large_arc);
    }

    #[test]
    fn test_quarter_slice_path() {
        let layout = SliceLayout::new(-FRAC_PI_2, FRAC_PI_2);
        let path = annular_path(&layout, &Projector::default(), &ChartConfig::default());
        assert_eq!(
            path,
            "M 160.000 45.000 A 115.000 115.000 0 0 1 275.000 160.000 \
             L 231.300 160.000 A 71.300 71.300 0 0 0 160.000 88.700 Z"
        );
    }

    #[test]
    fn test_full_circle_path_uses_two_halves() {
        let layout = SliceLayout::new(-FRAC_PI_2, TAU);
        assert!(layout.is_full_circle());
        let path = annular_path(&layout, &Projector::default(), &ChartConfig::default());
        assert_eq!(
            path,
            "M 160.000 45.000 A 115.000 115.000 0 0 1 160.000 275.000 \
             A 115.000 115.000 0 0 1 160.000 45.000 \
             L 160.000 88.700 A 71.300 71.300 0 0 0 160.000 231.300 \
             A 71.300 71.300 0 0 0 160.000 88.700 Z"
        );
    }

    #[test]
    fn test_zero_share_is_degenerate_not_nan() {
        let layouts = layout_angles(&[0.0, 1.0], 0.0);
        assert_eq!(layouts[0].slice_angle, 0.0);
        let path = annular_path(&layouts[0], &Projector::default(), &ChartConfig::default());
        assert!(!path.contains("NaN"));
    }
}
