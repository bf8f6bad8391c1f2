//! Filter parameter errors.

#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::spec::FilterKind;

/// Errors raised while validating or parsing a filter description.
///
/// Every variant is an invalid-parameter condition. Validation runs to
/// completion before any numeric design work, so a returned error means no
/// coefficients were produced.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// The filter type name is not one of the supported kinds.
    UnknownFilterType(String),
    /// Filter order must be at least 1.
    InvalidOrder(i64),
    /// Sample rate must be positive.
    InvalidSampleRate(u32),
    /// A numeric field could not be parsed.
    InvalidNumber {
        /// Which field was being parsed.
        field: &'static str,
        /// The raw text supplied.
        value: String,
    },
    /// Number of cutoff frequencies does not match the filter kind.
    CutoffArity {
        /// Filter kind the cutoff was supplied for.
        kind: FilterKind,
        /// Number of cutoffs the kind requires.
        expected: usize,
        /// Number of cutoffs supplied.
        found: usize,
    },
    /// A cutoff is not strictly inside `(0, nyquist)`.
    CutoffOutOfRange {
        /// Offending cutoff in Hz.
        cutoff: f64,
        /// Nyquist frequency in Hz.
        nyquist: f64,
    },
    /// Band edges are not strictly increasing.
    CutoffOrder {
        /// Lower band edge in Hz.
        low: f64,
        /// Upper band edge in Hz.
        high: f64,
    },
}

impl core::fmt::Display for FilterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownFilterType(name) => write!(
                f,
                "unsupported filter type '{name}' (expected low, high, band or bandstop)"
            ),
            Self::InvalidOrder(order) => write!(f, "filter order must be >= 1, got {order}"),
            Self::InvalidSampleRate(sr) => write!(f, "sample rate must be positive, got {sr}"),
            Self::InvalidNumber { field, value } => {
                write!(f, "invalid {field}: '{value}' is not a number")
            }
            Self::CutoffArity {
                kind,
                expected,
                found,
            } => write!(
                f,
                "{kind} filter needs {expected} cutoff value(s), got {found}"
            ),
            Self::CutoffOutOfRange { cutoff, nyquist } => write!(
                f,
                "cutoff {cutoff} Hz must lie strictly between 0 and the Nyquist frequency {nyquist} Hz"
            ),
            Self::CutoffOrder { low, high } => write!(
                f,
                "band cutoffs must satisfy low < high, got ({low}, {high})"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FilterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_display_names_the_input() {
        let err = FilterError::UnknownFilterType("comb".to_string());
        let msg = err.to_string();
        assert!(msg.contains("comb"), "got: {msg}");
    }

    #[test]
    fn arity_display() {
        let err = FilterError::CutoffArity {
            kind: FilterKind::Bandpass,
            expected: 2,
            found: 1,
        };
        assert_eq!(err.to_string(), "band filter needs 2 cutoff value(s), got 1");
    }

    #[test]
    fn out_of_range_display() {
        let err = FilterError::CutoffOutOfRange {
            cutoff: 5000.0,
            nyquist: 4000.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("5000"), "got: {msg}");
        assert!(msg.contains("4000"), "got: {msg}");
    }
}
