//! Error types for audio I/O and analysis sessions.

use filtra_analysis::PreviewError;
use filtra_config::ConfigError;
use filtra_core::FilterError;

/// Error types for audio I/O and analysis operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filter parameters failed validation.
    #[error("invalid filter parameters: {0}")]
    InvalidParameter(#[from] FilterError),

    /// Analyzer configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Samples do not form a valid signal.
    #[error("invalid signal: {0}")]
    InvalidSignal(String),

    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input holds more samples than the configured limit.
    #[error("input has {samples} samples, limit is {limit}")]
    InputTooLarge {
        /// Frames times channels in the input.
        samples: u64,
        /// Configured `max_samples`.
        limit: usize,
    },

    /// The filtered signal was requested before any filter was applied.
    #[error("no filtered signal; apply a filter first")]
    NoFilteredSignal,

    /// Waveform preview could not be produced.
    #[error("failed to render waveform: {0}")]
    Render(#[from] PreviewError),
}

/// Coarse classification of an [`Error`], for callers mapping errors to
/// responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad filter parameters, config or signal shape.
    InvalidParameter,
    /// Unreadable, unwritable or corrupt audio.
    Io,
    /// Input above the configured sample limit.
    InputTooLarge,
    /// Filtered output requested before filtering.
    NoFilteredSignal,
    /// Preview rendering failed.
    Render,
}

impl Error {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidParameter(_) | Error::Config(_) | Error::InvalidSignal(_) => {
                ErrorKind::InvalidParameter
            }
            Error::Wav(_) | Error::Io(_) => ErrorKind::Io,
            Error::InputTooLarge { .. } => ErrorKind::InputTooLarge,
            Error::NoFilteredSignal => ErrorKind::NoFilteredSignal,
            Error::Render(_) => ErrorKind::Render,
        }
    }
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
