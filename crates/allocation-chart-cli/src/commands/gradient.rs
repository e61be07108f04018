use clap::Args;
use serde::Serialize;
use serde_json::Value;

use allocation_chart_core::gradient::{gradient_vector, GradientAngleTable};

/// Arguments for a single gradient vector
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct GradientArgs {
    /// CSS linear-gradient angle in degrees (0 points up, clockwise)
    #[arg(long)]
    pub angle: Option<f64>,

    /// Look the angle up in the reference table instead (unknown labels use 0)
    #[arg(long, conflicts_with = "angle")]
    pub label: Option<String>,
}

#[derive(Debug, Serialize)]
struct GradientOutput {
    angle: f64,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

pub fn run_gradient(args: GradientArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let angle = match (args.angle, args.label) {
        (Some(angle), _) => angle,
        (None, Some(label)) => GradientAngleTable::reference().angle_for(&label),
        (None, None) => return Err("Provide --angle DEGREES or --label NAME".into()),
    };
    if !angle.is_finite() {
        return Err("--angle must be a finite number".into());
    }

    let v = gradient_vector(angle);
    let output = GradientOutput {
        angle,
        x1: v.x1,
        y1: v.y1,
        x2: v.x2,
        y2: v.y2,
    };

    Ok(serde_json::to_value(output)?)
}
