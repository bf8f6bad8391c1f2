//! Filtra CLI - design Butterworth filters, apply them to WAV files and
//! export their responses.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "filtra")]
#[command(author, version, about = "Butterworth filter analysis for WAV files", long_about = None)]
struct Cli {
    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the user config path)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show sample rate, duration and channel count of a WAV file
    Info(commands::info::InfoArgs),

    /// Filter a WAV file and save the result
    Filter(commands::filter::FilterArgs),

    /// Export frequency, impulse and time-domain responses as chart JSON
    Plot(commands::plot::PlotArgs),

    /// Export the DTFT magnitude or a spectrogram as JSON
    Spectrum(commands::spectrum::SpectrumArgs),

    /// Render a normalized waveform preview
    Waveform(commands::waveform::WaveformArgs),

    /// Show or initialize the configuration file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Info(args) => commands::info::run(args, config_path),
        Commands::Filter(args) => commands::filter::run(args, config_path),
        Commands::Plot(args) => commands::plot::run(args, config_path),
        Commands::Spectrum(args) => commands::spectrum::run(args, config_path),
        Commands::Waveform(args) => commands::waveform::run(args, config_path),
        Commands::Config(args) => commands::config::run(args, config_path),
    }
}
