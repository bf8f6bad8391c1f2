//! Export the DTFT magnitude or a spectrogram as JSON.

use std::path::{Path, PathBuf};

use clap::Args;
use filtra_analysis::{ChartData, downsample};

use super::common;

#[derive(Args)]
pub struct SpectrumArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Emit a spectrogram instead of the magnitude spectrum
    #[arg(long)]
    spectrogram: bool,

    /// Samples per spectrogram segment (defaults to the config value)
    #[arg(long, value_name = "SAMPLES")]
    segment: Option<usize>,

    /// Points in the magnitude chart after downsampling (defaults to the config value)
    #[arg(long)]
    max_points: Option<usize>,

    /// Write JSON here instead of stdout
    #[arg(short = 'O', long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

pub fn run(args: SpectrumArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let mut config = common::load_config(config)?;
    if let Some(segment) = args.segment {
        config.spectrogram_segment = segment;
    }
    let max_points = args.max_points.unwrap_or(config.chart_max_points);

    let analyzer = common::open(&args.input, config)?;
    let value = if args.spectrogram {
        let spectrogram = analyzer.spectrogram();
        tracing::debug!(
            frames = spectrogram.num_frames(),
            bins = spectrogram.num_bins(),
            "spectrogram computed"
        );
        serde_json::to_value(&spectrogram)?
    } else {
        let series = downsample(&analyzer.dtft_magnitude(), max_points);
        serde_json::to_value(ChartData::from_series(&series))?
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };

    match args.out {
        Some(path) => {
            std::fs::write(&path, json)?;
            tracing::info!(path = %path.display(), "spectrum written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
