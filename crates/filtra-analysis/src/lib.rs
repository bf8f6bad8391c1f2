//! Filtra Analysis - filter responses packaged for plotting
//!
//! This crate turns designed filters and filtered signals into named,
//! labelled series that a charting front end can draw directly:
//!
//! - [`response`] - frequency, impulse and time-domain responses
//! - [`series`] - [`ResponseSeries`] and the mergeable [`ResponseBundle`]
//! - [`downsample`] - peak-preserving point reduction for transport
//! - [`chart`] - Chart.js-shaped export of a response bundle
//! - [`preview`] - normalized waveform preview rendered to a base64 PNG
//! - [`fft`] - windowed FFT on `rustfft`
//! - [`spectrum`] - whole-signal FFT and DTFT magnitude
//! - [`spectrogram`] - STFT power spectral density over time
//!
//! ## Example Workflow
//!
//! ```rust,ignore
//! use filtra_analysis::{chart, response, ResponseBundle};
//! use filtra_core::{FilterSpec, apply, design};
//!
//! let spec = FilterSpec::lowpass(4, 1000.0, 8000);
//! let coeffs = design(&spec)?;
//! let filtered = apply(&coeffs, &signal);
//!
//! let mut bundle = ResponseBundle::new();
//! bundle.insert(ResponseName::FrequencyResponse, response::frequency_response(&coeffs, 8000, 512));
//! let charts = chart::export(&bundle, 2000);
//! println!("{}", serde_json::to_string(&charts)?);
//! ```

pub mod chart;
pub mod downsample;
pub mod fft;
pub mod preview;
pub mod response;
pub mod series;
pub mod spectrogram;
pub mod spectrum;

pub use chart::{ChartBundle, ChartData, Dataset};
pub use downsample::downsample;
pub use fft::{Fft, Window};
pub use preview::{PreviewError, PreviewOptions, waveform_png_base64};
pub use series::{PlotType, ResponseBundle, ResponseName, ResponseSeries};
pub use spectrogram::{Spectrogram, StftAnalyzer, spectrogram};
pub use spectrum::{dtft_magnitude, fourier_transform};
