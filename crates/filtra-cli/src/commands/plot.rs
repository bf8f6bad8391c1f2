//! Export filter responses as chart JSON.

use std::path::{Path, PathBuf};

use clap::Args;

use super::common::{self, FilterParams};

#[derive(Args)]
pub struct PlotArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    #[command(flatten)]
    params: FilterParams,

    /// Points per series after downsampling (defaults to the config value)
    #[arg(long)]
    max_points: Option<usize>,

    /// Write JSON here instead of stdout
    #[arg(short = 'O', long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

pub fn run(args: PlotArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let config = common::load_config(config)?;
    let max_points = args.max_points.unwrap_or(config.chart_max_points);

    let mut analyzer = common::open(&args.input, config)?;
    let spec = args.params.to_spec(analyzer.sample_rate())?;
    analyzer.compute_responses(&spec)?;
    let charts = analyzer.export_chart_data(max_points);

    let json = if args.pretty {
        serde_json::to_string_pretty(&charts)?
    } else {
        serde_json::to_string(&charts)?
    };

    match args.out {
        Some(path) => {
            std::fs::write(&path, json)?;
            tracing::info!(path = %path.display(), series = charts.len(), "chart data written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
