//! Audio I/O and analysis orchestration for filtra.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`], [`write_wav`] and in-memory variants
//! - **Analysis sessions**: [`AudioAnalyzer`] loads a signal, filters it,
//!   computes responses and exports chart data
//! - **Diagnostics**: the [`DiagnosticSink`] trait, with [`TracingSink`]
//!   forwarding events to `tracing`
//! - **Naming**: [`suggested_filename`] for filtered downloads
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use filtra_core::FilterSpec;
//! use filtra_io::AudioAnalyzer;
//!
//! let mut analyzer = AudioAnalyzer::load_path("input.wav")?;
//! let spec = FilterSpec::lowpass(4, 1000.0, analyzer.sample_rate());
//!
//! analyzer.apply_filter(&spec)?;
//! analyzer.compute_responses(&spec)?;
//! let charts = analyzer.export_chart_data(2000);
//! analyzer.save(true, "output.wav")?;
//! ```

mod analyzer;
mod diagnostics;
mod error;
mod naming;
mod wav;

pub use analyzer::{AnalysisSnapshot, AnalyzerBuilder, AudioAnalyzer, SignalInfo};
pub use diagnostics::{Diagnostic, DiagnosticSink, NullSink, TracingSink};
pub use error::{Error, ErrorKind, Result};
pub use naming::{TIMESTAMP_FORMAT, default_output_path, suggested_filename};
pub use wav::{
    AudioSignal, WavFormat, WavSpec, read_wav, read_wav_from, write_wav, write_wav_bytes,
    write_wav_to,
};
