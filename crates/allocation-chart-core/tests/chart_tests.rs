use allocation_chart_core::allocation::AllocationSlice;
use allocation_chart_core::geometry::TextAnchor;
use allocation_chart_core::gradient::GradientAngleTable;
use allocation_chart_core::{
    build_chart, compute_allocation_chart, AllocationInput, ChartConfig, ChartError, Point,
};
use approx::assert_abs_diff_eq;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use std::f64::consts::{FRAC_PI_2, TAU};

const CENTER: Point = Point::new(160.0, 160.0);

fn portfolio() -> AllocationInput {
    AllocationInput::new(vec![
        AllocationSlice::new("BTC", dec!(24000), "#F7931A"),
        AllocationSlice::new("ETH", dec!(25600), "#627EEA"),
        AllocationSlice::new("GOLD", dec!(9750), "#D4AF37"),
    ])
    .with_gradient_angles(GradientAngleTable::reference())
}

fn uneven() -> AllocationInput {
    AllocationInput::new(vec![
        AllocationSlice::new("Equities", dec!(61250.50), "#1D4ED8"),
        AllocationSlice::new("Bonds", dec!(20000), "#059669"),
        AllocationSlice::new("Cash", dec!(1200.25), "#9CA3AF"),
        AllocationSlice::new("REITs", dec!(7400), "#B45309"),
        AllocationSlice::new("Crypto", dec!(333.33), "#7C3AED"),
    ])
}

// ---------------------------------------------------------------------------
// Reference scenario
// ---------------------------------------------------------------------------

#[test]
fn test_reference_portfolio_angles() {
    let (chart, _) = build_chart(&portfolio()).unwrap();
    assert_eq!(chart.total_value, dec!(59350));

    let degrees: Vec<f64> = chart.slices.iter().map(|s| s.slice_angle.to_degrees()).collect();
    assert_abs_diff_eq!(degrees[0], 145.58, epsilon = 0.01);
    assert_abs_diff_eq!(degrees[1], 155.28, epsilon = 0.01);
    assert_abs_diff_eq!(degrees[2], 59.14, epsilon = 0.01);
    assert_abs_diff_eq!(degrees.iter().sum::<f64>(), 360.0, epsilon = 1e-9);
}

#[test]
fn test_reference_portfolio_btc_slice() {
    let (chart, _) = build_chart(&portfolio()).unwrap();
    let btc = &chart.slices[0];

    assert_abs_diff_eq!(btc.start_angle, -FRAC_PI_2, epsilon = 1e-12);
    assert_abs_diff_eq!(btc.end_angle.to_degrees(), 55.58, epsilon = 0.01);
    assert_abs_diff_eq!(btc.mid_angle.to_degrees(), -17.21, epsilon = 0.01);
    assert_eq!(btc.connector.text_anchor, TextAnchor::Start);
    assert!(!btc.large_arc);
    assert!(btc.path.starts_with("M 160.000 45.000 A 115.000 115.000 0 0 1 "));
    assert!(btc.path.ends_with(" Z"));

    // no holding spans more than half a turn
    assert!(chart.slices.iter().all(|s| !s.large_arc));
    // ETH's bisector is on the left half
    assert_eq!(chart.slices[1].connector.text_anchor, TextAnchor::End);
}

#[test]
fn test_reference_portfolio_gradients() {
    let (chart, warnings) = build_chart(&portfolio()).unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    let angles: Vec<f64> = chart.gradient_defs.iter().map(|g| g.angle).collect();
    assert_eq!(angles, vec![35.87, 27.79, 92.41]);
    for def in &chart.gradient_defs {
        assert_eq!(def.stops.len(), 4);
    }
}

// ---------------------------------------------------------------------------
// Layout properties
// ---------------------------------------------------------------------------

#[test]
fn test_angle_conservation() {
    for input in [portfolio(), uneven()] {
        let (chart, _) = build_chart(&input).unwrap();
        let total: f64 = chart.slices.iter().map(|s| s.slice_angle).sum();
        assert_abs_diff_eq!(total, TAU, epsilon = 1e-9);
    }
}

#[test]
fn test_slices_are_contiguous() {
    let (chart, _) = build_chart(&uneven()).unwrap();
    // equities hold over two thirds of the total
    assert!(chart.slices[0].large_arc);
    assert!(chart.slices[1..].iter().all(|s| !s.large_arc));
    for pair in chart.slices.windows(2) {
        assert_eq!(pair[0].end_angle, pair[1].start_angle);
    }
    let last = chart.slices.last().unwrap();
    assert_abs_diff_eq!(last.end_angle, -FRAC_PI_2 + TAU, epsilon = 1e-9);
}

#[test]
fn test_proportionality() {
    let (chart, _) = build_chart(&uneven()).unwrap();
    for a in &chart.slices {
        for b in &chart.slices {
            let angle_ratio = a.slice_angle / b.slice_angle;
            let value_ratio = a.datum.share / b.datum.share;
            assert_abs_diff_eq!(angle_ratio, value_ratio, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_rim_placement() {
    let (chart, _) = build_chart(&uneven()).unwrap();
    for slice in &chart.slices {
        let c = &slice.connector;
        assert_abs_diff_eq!(c.start().distance_to(&CENTER), 115.0, epsilon = 1e-6);
        assert_abs_diff_eq!(c.elbow().distance_to(&CENTER), 127.0, epsilon = 1e-6);
    }
}

#[test]
fn test_side_consistency() {
    let (chart, _) = build_chart(&uneven()).unwrap();
    for slice in &chart.slices {
        let c = &slice.connector;
        if slice.mid_angle.cos() >= 0.0 {
            assert_eq!(c.text_anchor, TextAnchor::Start);
            assert_abs_diff_eq!(c.end_x - c.elbow_x, 32.0, epsilon = 1e-9);
        } else {
            assert_eq!(c.text_anchor, TextAnchor::End);
            assert_abs_diff_eq!(c.end_x - c.elbow_x, -32.0, epsilon = 1e-9);
        }
        assert_eq!(c.end_y, c.elbow_y);
    }
}

#[test]
fn test_idempotence() {
    let first = build_chart(&uneven()).unwrap().0;
    let second = build_chart(&uneven()).unwrap().0;
    assert_eq!(first, second);
    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_degenerate_input() {
    let out = compute_allocation_chart(&AllocationInput::default()).unwrap();
    assert!(out.result.slices.is_empty());
    assert!(out.result.gradient_defs.is_empty());
    assert_eq!(out.warnings.len(), 1);
}

// ---------------------------------------------------------------------------
// Edge cases and policy
// ---------------------------------------------------------------------------

#[test]
fn test_single_holding_is_full_ring() {
    let input = AllocationInput::new(vec![AllocationSlice::new("BTC", dec!(5), "#F7931A")]);
    let (chart, _) = build_chart(&input).unwrap();
    let slice = &chart.slices[0];
    assert_abs_diff_eq!(slice.slice_angle, TAU, epsilon = 1e-12);
    assert!(slice.large_arc);
    // two arcs per ring
    assert_eq!(slice.path.matches(" A ").count(), 4);
    assert_eq!(slice.datum.percentage, "100.00%");
}

#[test]
fn test_zero_amount_slice_warns_but_renders() {
    let input = AllocationInput::new(vec![
        AllocationSlice::new("BTC", dec!(10), "#F7931A"),
        AllocationSlice::new("DOGE", dec!(0), "#C2A633"),
        AllocationSlice::new("ETH", dec!(10), "#627EEA"),
    ]);
    let (chart, warnings) = build_chart(&input).unwrap();
    assert_eq!(chart.slices.len(), 3);
    assert_eq!(chart.slices[1].slice_angle, 0.0);
    assert_eq!(chart.slices[1].start_angle, chart.slices[1].end_angle);
    assert!(warnings
        .iter()
        .any(|w| w.contains("'DOGE' has a zero amount")));
}

#[test]
fn test_negative_amount_is_rejected() {
    let input = AllocationInput::new(vec![
        AllocationSlice::new("BTC", dec!(10), "#F7931A"),
        AllocationSlice::new("SHORT", dec!(-3), "#000000"),
    ]);
    let err = build_chart(&input).unwrap_err();
    assert!(matches!(err, ChartError::InvalidInput { .. }));
    assert!(err.to_string().contains("slices[1].amount"));
}

#[test]
fn test_overflowing_total_is_an_error() {
    let json = r##"{"slices": [
        {"label": "A", "amount": "60000000000000000000000000000", "color": "#000000"},
        {"label": "B", "amount": "60000000000000000000000000000", "color": "#FFFFFF"}
    ]}"##;
    let input: AllocationInput = serde_json::from_str(json).unwrap();
    let err = build_chart(&input).unwrap_err();
    assert!(matches!(err, ChartError::InvalidInput { .. }));
    assert!(err.to_string().contains("slices[1].amount"));
    assert!(compute_allocation_chart(&input).is_err());
}

#[test]
fn test_custom_geometry_config() {
    let config = ChartConfig {
        svg_size: 200.0,
        outer_radius: 80.0,
        inner_radius_ratio: 0.5,
        horizontal_offset: 20.0,
        precision: 1,
        ..ChartConfig::default()
    };
    let (chart, _) = build_chart(&portfolio().with_config(config)).unwrap();
    let center = Point::new(100.0, 100.0);
    let btc = &chart.slices[0];
    assert!(btc.path.starts_with("M 100.0 20.0 A 80.0 80.0 0 0 1 "));
    assert!(btc.path.contains(" A 40.0 40.0 0 0 0 100.0 60.0 Z"));
    assert_abs_diff_eq!(btc.connector.start().distance_to(&center), 80.0, epsilon = 1e-9);
    assert_abs_diff_eq!(btc.connector.end_x - btc.connector.elbow_x, 20.0, epsilon = 1e-9);
}

#[test]
fn test_input_from_json() {
    let json = r##"{
        "slices": [
            {"label": "BTC", "amount": 24000, "color": "#F7931A", "display_value": "$24k", "percentage": "40%"},
            {"label": "ETH", "amount": "25600", "color": "#627EEA"}
        ],
        "currency": "EUR",
        "gradient_angles": {"BTC": 35.87},
        "as_of": "2024-06-30",
        "config": {"precision": 2}
    }"##;
    let input: AllocationInput = serde_json::from_str(json).unwrap();
    let out = compute_allocation_chart(&input).unwrap();
    let chart = &out.result;
    assert_eq!(chart.slices[0].datum.display_value, "$24k");
    assert_eq!(chart.slices[0].datum.percentage, "40%");
    assert_eq!(chart.slices[1].datum.display_value, "€25,600");
    assert_eq!(chart.config.precision, 2);
    assert!(chart.slices[0].path.starts_with("M 160.00 45.00 "));
    assert_eq!(out.assumptions["as_of"], "2024-06-30");
    assert!(out.warnings.iter().any(|w| w.contains("'ETH'")));
}
