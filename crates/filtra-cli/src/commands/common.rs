//! Shared CLI helpers used across multiple commands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use filtra_config::AnalyzerConfig;
use filtra_core::FilterSpec;
use filtra_io::AudioAnalyzer;

/// Filter parameters as typed on the command line.
#[derive(Args, Debug, Clone)]
pub struct FilterParams {
    /// Filter type: low, high, band or bandstop
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: String,

    /// Filter order (1 or more)
    #[arg(short, long, default_value = "4")]
    pub order: String,

    /// Cutoff in Hz; "low,high" for band and bandstop
    #[arg(short, long)]
    pub cutoff: String,
}

impl FilterParams {
    /// Validated spec for a signal at `sample_rate`.
    pub fn to_spec(&self, sample_rate: u32) -> anyhow::Result<FilterSpec> {
        FilterSpec::from_params(&self.kind, &self.order, &self.cutoff, sample_rate)
            .context("invalid filter parameters")
    }
}

/// Loads the config from `path`, or the user config, falling back to defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AnalyzerConfig> {
    let path = path.map_or_else(filtra_config::config_path, Path::to_path_buf);
    AnalyzerConfig::load_or_default(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))
}

/// Opens `input` with the given config.
pub fn open(input: &Path, config: AnalyzerConfig) -> anyhow::Result<AudioAnalyzer> {
    AudioAnalyzer::builder()
        .config(config)
        .load_path(input)
        .with_context(|| format!("failed to load {}", input.display()))
}

/// Stem of `input`, used to name derived files.
pub fn file_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string())
}

/// Directory that holds `input`.
pub fn parent_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Duration rounded to two decimals, as reported to users.
pub fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}
