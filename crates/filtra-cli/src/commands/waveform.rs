//! Render a normalized waveform preview.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use clap::Args;

use super::common;

#[derive(Args)]
pub struct WaveformArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Save the PNG here instead of printing base64 to stdout
    #[arg(long, value_name = "FILE")]
    png: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,
}

pub fn run(args: WaveformArgs, config: Option<&Path>) -> anyhow::Result<()> {
    let mut config = common::load_config(config)?;
    if let Some(width) = args.width {
        config.preview_width = width;
    }
    if let Some(height) = args.height {
        config.preview_height = height;
    }

    let analyzer = common::open(&args.input, config)?;
    let encoded = analyzer.waveform_preview()?;

    match args.png {
        Some(path) => {
            std::fs::write(&path, STANDARD.decode(&encoded)?)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{encoded}"),
    }

    Ok(())
}
