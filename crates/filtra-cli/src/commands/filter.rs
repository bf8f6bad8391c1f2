//! Filter a WAV file and save the result.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use filtra_analysis::response::magnitude_db_at;
use filtra_core::{Cutoff, design};
use filtra_io::suggested_filename;
use indicatif::{ProgressBar, ProgressStyle};

use super::common::{self, FilterParams};

#[derive(Args)]
pub struct FilterArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (defaults to a timestamped name next to the input)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    params: FilterParams,

    /// Output bit depth (8, 16, 24 or 32; defaults to the input's)
    #[arg(long)]
    bit_depth: Option<u16>,
}

pub fn run(args: FilterArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let mut config = common::load_config(config)?;
    if args.bit_depth.is_some() {
        config.output_bits = args.bit_depth;
    }

    println!("Reading {}...", args.input.display());
    let mut analyzer = common::open(&args.input, config)?;
    let info = analyzer.metadata();
    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        info.frames, info.channels, info.sample_rate, info.duration_secs
    );

    let spec = args.params.to_spec(info.sample_rate)?;
    let coeffs = design(&spec)?;
    println!(
        "Butterworth {} order {} at {} Hz ({} sections)",
        spec.kind,
        spec.order,
        spec.cutoff,
        coeffs.sections().len()
    );
    let edges = match spec.cutoff {
        Cutoff::Single(hz) => vec![hz],
        Cutoff::Band(low, high) => vec![low, high],
    };
    for hz in edges {
        println!(
            "  {:>8.1} Hz: {:.2} dB",
            hz,
            magnitude_db_at(&coeffs, hz, info.sample_rate)
        );
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed_precise}]")?);
    pb.set_message("Filtering");
    pb.enable_steady_tick(Duration::from_millis(100));
    analyzer.apply_filter(&spec)?;
    pb.finish_with_message("Filtered");

    let output = match args.output {
        Some(path) => path,
        None => common::parent_dir(&args.input).join(suggested_filename(
            &common::file_stem(&args.input),
            &spec,
            &chrono::Local::now(),
        )),
    };

    println!("Writing {}...", output.display());
    analyzer
        .save(true, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Done!");

    Ok(())
}
