//! Display WAV file metadata.

use std::path::{Path, PathBuf};

use clap::Args;
use filtra_io::WavFormat;
use serde::Serialize;

use super::common;

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: PathBuf,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct InfoReport {
    filename: String,
    sample_rate: u32,
    duration: f64,
    channels: usize,
}

/// Run the info command.
pub fn run(args: InfoArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let analyzer = common::open(&args.file, common::load_config(config)?)?;
    let info = analyzer.metadata();

    if args.json {
        let report = InfoReport {
            filename: args
                .file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            sample_rate: info.sample_rate,
            duration: common::round_secs(info.duration_secs),
            channels: info.channels,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let spec = analyzer.original().spec();
    let format_str = match spec.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };

    println!("File:        {}", args.file.display());
    println!("Format:      {} {}-bit", format_str, spec.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.2}s ({} frames)",
        info.duration_secs, info.frames
    );

    Ok(())
}
