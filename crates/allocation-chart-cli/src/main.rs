mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::chart::{ChartArgs, SvgArgs};
use commands::gradient::GradientArgs;

/// Donut chart geometry for portfolio allocations
#[derive(Parser)]
#[command(
    name = "achart",
    version,
    about = "Donut chart geometry for portfolio allocations",
    long_about = "Computes annular slice paths, leader-line label placements and \
                  highlight gradients for a set of portfolio holdings, and renders \
                  them as a standalone SVG."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log engine decisions to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute slice paths, connectors and gradients
    Chart(ChartArgs),
    /// Render the chart as an SVG document
    Svg(SvgArgs),
    /// Convert a CSS gradient angle to SVG gradient endpoints
    Gradient(GradientArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Chart(args) => commands::chart::run_chart(args),
        Commands::Svg(args) => commands::chart::run_svg(args),
        Commands::Gradient(args) => commands::gradient::run_gradient(args),
        Commands::Version => {
            println!("achart {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        // the svg command already wrote the document to stdout
        Ok(serde_json::Value::Null) => process::exit(0),
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
