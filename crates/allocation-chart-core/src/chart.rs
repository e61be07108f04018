use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::allocation::{aggregate, AllocationSlice};
use crate::config::ChartConfig;
use crate::geometry::{build_slices, SliceGeometry};
use crate::gradient::{build_gradients, GradientAngleTable, GradientDef};
use crate::types::*;
use crate::ChartResult;

/// Everything needed to lay out one donut chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationInput {
    /// Holdings in display order
    pub slices: Vec<AllocationSlice>,
    /// Currency used when deriving display values
    #[serde(default)]
    pub currency: Currency,
    /// Label → CSS gradient angle for the highlight overlay
    #[serde(default)]
    pub gradient_angles: GradientAngleTable,
    /// Date of the holdings snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub config: ChartConfig,
}

impl AllocationInput {
    pub fn new(slices: Vec<AllocationSlice>) -> Self {
        Self {
            slices,
            ..Self::default()
        }
    }

    pub fn with_gradient_angles(mut self, angles: GradientAngleTable) -> Self {
        self.gradient_angles = angles;
        self
    }

    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }
}

/// Computed donut chart geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationChart {
    pub total_value: Money,
    pub gradient_defs: Vec<GradientDef>,
    pub slices: Vec<SliceGeometry>,
    /// Configuration the geometry was computed with
    pub config: ChartConfig,
}

impl AllocationChart {
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn gradient_for(&self, slice_id: &str) -> Option<&GradientDef> {
        self.gradient_defs.iter().find(|g| g.slice_id == slice_id)
    }
}

/// Lay out the chart and collect non-fatal warnings.
///
/// An empty input or a zero total yields a chart with no slices and no
/// gradients; callers render their own empty state.
pub fn build_chart(input: &AllocationInput) -> ChartResult<(AllocationChart, Vec<String>)> {
    input.config.validate()?;

    let aggregation = aggregate(&input.slices, &input.currency)?;
    let mut warnings: Vec<String> = Vec::new();

    tracing::debug!(
        slices = aggregation.data.len(),
        total = %aggregation.total_value,
        "aggregated allocation"
    );

    if aggregation.is_empty() {
        if aggregation.data.is_empty() {
            warnings.push("No allocation slices supplied; nothing to chart".into());
        } else {
            warnings.push("Total allocation is zero; nothing to chart".into());
        }
        emit(&warnings);
        let chart = AllocationChart {
            total_value: aggregation.total_value,
            gradient_defs: Vec::new(),
            slices: Vec::new(),
            config: input.config.clone(),
        };
        return Ok((chart, warnings));
    }

    for datum in aggregation.data.iter().filter(|d| d.value.is_zero()) {
        warnings.push(format!(
            "Slice '{}' has a zero amount and occupies no angle",
            datum.id
        ));
    }

    if input.gradient_angles.is_empty() {
        warnings.push("No gradient angles supplied; all gradients use 0°".into());
    } else {
        for datum in &aggregation.data {
            if !input.gradient_angles.contains(&datum.id) {
                warnings.push(format!("No gradient angle for '{}'; using 0°", datum.id));
            }
        }
    }

    let gradient_defs = build_gradients(
        &aggregation.data,
        &input.gradient_angles,
        &input.config.gradient,
    );
    let slices = build_slices(&aggregation, &input.config);

    emit(&warnings);
    let chart = AllocationChart {
        total_value: aggregation.total_value,
        gradient_defs,
        slices,
        config: input.config.clone(),
    };
    Ok((chart, warnings))
}

/// Lay out the chart and wrap it in the standard computation envelope.
pub fn compute_allocation_chart(
    input: &AllocationInput,
) -> ChartResult<ComputationOutput<AllocationChart>> {
    let start = Instant::now();
    let (chart, warnings) = build_chart(input)?;

    let config = &input.config;
    let assumptions = serde_json::json!({
        "slice_count": input.slices.len(),
        "total_value": chart.total_value.to_string(),
        "currency": input.currency,
        "as_of": input.as_of,
        "svg_size": config.svg_size,
        "outer_radius": config.outer_radius,
        "inner_radius": config.inner_radius(),
        "start_angle_deg": config.start_angle.to_degrees(),
        "direction": "clockwise",
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annular allocation chart (proportional arcs, elbow leader lines)",
        &assumptions,
        warnings,
        elapsed,
        chart,
    ))
}

fn emit(warnings: &[String]) {
    for w in warnings {
        tracing::warn!("{w}");
    }
}
