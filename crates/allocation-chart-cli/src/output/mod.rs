pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{json, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten a chart envelope into one row per slice for tabular formats.
/// Returns None when the value is not a chart result.
pub fn slice_rows(value: &Value) -> Option<Vec<Value>> {
    let slices = value.get("result")?.get("slices")?.as_array()?;
    let rows = slices
        .iter()
        .map(|slice| {
            let datum = &slice["datum"];
            let connector = &slice["connector"];
            json!({
                "id": datum["id"],
                "value": datum["value"],
                "percentage": datum["percentage"],
                "display_value": datum["display_value"],
                "start_deg": round_deg(&slice["start_angle"]),
                "sweep_deg": round_deg(&slice["slice_angle"]),
                "anchor": connector["text_anchor"],
                "label_x": round_coord(&connector["label_x"]),
                "label_y": round_coord(&connector["label_y"]),
            })
        })
        .collect();
    Some(rows)
}

fn round_deg(radians: &Value) -> Value {
    radians
        .as_f64()
        .map(|r| json!((r.to_degrees() * 100.0).round() / 100.0))
        .unwrap_or(Value::Null)
}

fn round_coord(v: &Value) -> Value {
    v.as_f64()
        .map(|c| json!((c * 1000.0).round() / 1000.0))
        .unwrap_or(Value::Null)
}
