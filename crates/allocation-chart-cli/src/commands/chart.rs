use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::fs;

use allocation_chart_core::allocation::AllocationSlice;
use allocation_chart_core::gradient::GradientAngleTable;
use allocation_chart_core::render::{render_allocation_svg, RenderOptions};
use allocation_chart_core::{compute_allocation_chart, AllocationInput, ChartConfig};

use crate::input;

/// Fill colors handed out to `--slice` entries that do not name one.
const DEFAULT_PALETTE: [&str; 8] = [
    "#F7931A", "#627EEA", "#D4AF37", "#14B8A6", "#EF4444", "#8B5CF6", "#22C55E", "#64748B",
];

/// Where the holdings come from, shared by `chart` and `svg`
#[derive(Args)]
pub struct SourceArgs {
    /// Path to a JSON/YAML input file (slices, currency, gradient_angles, config)
    #[arg(long)]
    pub input: Option<String>,

    /// A holding as LABEL:AMOUNT[:COLOR]; repeat for each slice
    #[arg(long = "slice", value_parser = parse_slice, conflicts_with = "input")]
    pub slices: Vec<AllocationSlice>,

    /// Gradient angle as LABEL=DEGREES; repeat for each label
    #[arg(long = "angle", value_parser = parse_angle, allow_hyphen_values = true)]
    pub angles: Vec<(String, f64)>,

    /// Seed the gradient angle table with the BTC/ETH/GOLD reference angles
    #[arg(long)]
    pub reference_angles: bool,

    /// Path to a JSON/YAML chart configuration (overrides the input file's)
    #[arg(long)]
    pub config: Option<String>,
}

/// Arguments for chart geometry
#[derive(Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for SVG rendering
#[derive(Args)]
pub struct SvgArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the SVG to this path instead of stdout
    #[arg(long)]
    pub out: Option<String>,

    /// Path to a JSON/YAML file with render options (fonts, colors, offsets)
    #[arg(long)]
    pub style: Option<String>,

    /// Omit leader lines and labels
    #[arg(long)]
    pub no_labels: bool,
}

pub fn run_chart(args: ChartArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let chart_input = load_input(&args.source)?;
    let result = compute_allocation_chart(&chart_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_svg(args: SvgArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let chart_input = load_input(&args.source)?;

    let mut options: RenderOptions = match args.style {
        Some(ref path) => input::file::read_typed(path)?,
        None => RenderOptions::default(),
    };
    if args.no_labels {
        options.show_labels = false;
    }

    let svg = render_allocation_svg(&chart_input, &options)?;

    match args.out {
        Some(path) => {
            fs::write(&path, &svg).map_err(|e| format!("Failed to write '{}': {}", path, e))?;
            tracing::info!(path = %path, bytes = svg.len(), "svg written");
            Ok(serde_json::json!({
                "svg_written": path,
                "bytes": svg.len(),
                "slices": chart_input.slices.len(),
            }))
        }
        None => {
            print!("{svg}");
            Ok(Value::Null)
        }
    }
}

/// Assemble the engine input from an input file, `--slice` flags (the two
/// are mutually exclusive) or piped stdin JSON. `--angle`, `--reference-angles`
/// and `--config` are layered on top.
fn load_input(args: &SourceArgs) -> Result<AllocationInput, Box<dyn std::error::Error>> {
    let mut chart_input: AllocationInput = if let Some(ref path) = args.input {
        from_value(input::file::read_value(path)?)?
    } else if !args.slices.is_empty() {
        AllocationInput::new(args.slices.clone())
    } else if let Some(data) = input::stdin::read_stdin()? {
        from_value(data)?
    } else {
        return Err("Provide --slice LABEL:AMOUNT, --input file or pipe JSON via stdin".into());
    };

    if args.reference_angles {
        let mut table = GradientAngleTable::reference();
        for (label, angle) in chart_input.gradient_angles.iter() {
            table.insert(label, angle);
        }
        chart_input.gradient_angles = table;
    }
    for (label, angle) in &args.angles {
        chart_input.gradient_angles.insert(label.clone(), *angle);
    }

    if let Some(ref path) = args.config {
        let config: ChartConfig = input::file::read_typed(path)?;
        chart_input.config = config;
    }

    tracing::debug!(
        slices = chart_input.slices.len(),
        angles = chart_input.gradient_angles.len(),
        "input loaded"
    );
    Ok(chart_input)
}

/// Accept either a full input object or a bare array of slices.
fn from_value(data: Value) -> Result<AllocationInput, Box<dyn std::error::Error>> {
    if data.is_array() {
        let slices: Vec<AllocationSlice> = serde_json::from_value(data)?;
        Ok(AllocationInput::new(slices))
    } else if data.is_object() {
        Ok(serde_json::from_value(data)?)
    } else {
        Err("Expected a JSON array of slices or an object with a 'slices' key".into())
    }
}

fn parse_slice(raw: &str) -> Result<AllocationSlice, String> {
    let mut parts = raw.splitn(3, ':');
    let label = parts.next().unwrap_or_default().trim();
    let amount = parts
        .next()
        .ok_or_else(|| format!("'{raw}' is not LABEL:AMOUNT[:COLOR]"))?
        .trim();
    if label.is_empty() {
        return Err(format!("'{raw}' has an empty label"));
    }
    let amount: Decimal = amount
        .parse()
        .map_err(|e| format!("Invalid amount '{amount}': {e}"))?;
    let color = match parts.next().map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_PALETTE[palette_index(label)].to_string(),
    };
    Ok(AllocationSlice::new(label, amount, color))
}

/// Stable color choice for a label, so repeated runs agree.
fn palette_index(label: &str) -> usize {
    let sum: usize = label.bytes().map(usize::from).sum();
    sum % DEFAULT_PALETTE.len()
}

fn parse_angle(raw: &str) -> Result<(String, f64), String> {
    let (label, deg) = raw
        .split_once('=')
        .ok_or_else(|| format!("'{raw}' is not LABEL=DEGREES"))?;
    let deg: f64 = deg
        .trim()
        .parse()
        .map_err(|e| format!("Invalid angle '{deg}': {e}"))?;
    if !deg.is_finite() {
        return Err(format!("Angle for '{label}' must be finite"));
    }
    Ok((label.trim().to_string(), deg))
}
