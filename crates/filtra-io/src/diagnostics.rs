//! Diagnostic events emitted by an analysis session.
//!
//! The analyzer never configures logging itself; it reports what happened
//! to a [`DiagnosticSink`] chosen by the caller.

use std::path::Path;

use filtra_core::FilterSpec;

use crate::Error;

/// Something an [`AudioAnalyzer`](crate::AudioAnalyzer) did or failed to do.
#[derive(Debug)]
pub enum Diagnostic<'a> {
    /// A signal was decoded or wrapped.
    Loaded {
        /// Sample rate in Hz.
        sample_rate: u32,
        /// Channel count.
        channels: usize,
        /// Samples per channel.
        frames: usize,
    },
    /// A filter ran over every channel.
    FilterApplied {
        /// The applied spec.
        spec: &'a FilterSpec,
        /// Number of second-order sections in the design.
        sections: usize,
    },
    /// Frequency, impulse and time-domain responses were computed.
    ResponsesComputed {
        /// The analyzed spec.
        spec: &'a FilterSpec,
        /// Points in the frequency response.
        bins: usize,
    },
    /// Chart payloads were exported.
    ChartsExported {
        /// Number of exported series.
        series: usize,
        /// Point budget per series.
        max_points: usize,
    },
    /// A spectral view of the signal was computed.
    SpectrumComputed {
        /// `fourier_transform`, `dtft_magnitude` or `spectrogram`.
        view: &'static str,
        /// Frequency bins in the result.
        bins: usize,
    },
    /// A signal was written to disk.
    Saved {
        /// Destination file.
        path: &'a Path,
        /// Whether the filtered signal was written.
        filtered: bool,
    },
    /// An operation failed; session state is unchanged.
    Failed {
        /// Name of the failing operation.
        operation: &'static str,
        /// What went wrong.
        error: &'a Error,
    },
}

/// Receiver for [`Diagnostic`] events.
pub trait DiagnosticSink: Send {
    /// Handles one event. Must not panic.
    fn record(&self, event: &Diagnostic<'_>);
}

/// Forwards events to the `tracing` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, event: &Diagnostic<'_>) {
        match event {
            Diagnostic::Loaded {
                sample_rate,
                channels,
                frames,
            } => tracing::info!(sample_rate, channels, frames, "audio loaded"),
            Diagnostic::FilterApplied { spec, sections } => tracing::info!(
                kind = %spec.kind,
                order = spec.order,
                cutoff = %spec.cutoff,
                sections,
                "filter applied"
            ),
            Diagnostic::ResponsesComputed { spec, bins } => tracing::debug!(
                kind = %spec.kind,
                order = spec.order,
                bins,
                "responses computed"
            ),
            Diagnostic::ChartsExported { series, max_points } => {
                tracing::debug!(series, max_points, "chart data exported")
            }
            Diagnostic::SpectrumComputed { view, bins } => {
                tracing::debug!(view, bins, "spectrum computed")
            }
            Diagnostic::Saved { path, filtered } => {
                tracing::info!(path = %path.display(), filtered, "audio saved")
            }
            Diagnostic::Failed { operation, error } => {
                tracing::warn!(operation, %error, "operation failed")
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&self, _event: &Diagnostic<'_>) {}
}
