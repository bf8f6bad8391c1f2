//! Filtra Core - Butterworth filter design and application
//!
//! This crate turns a filter description into numerically usable digital
//! filter coefficients and runs those coefficients over sample buffers.
//!
//! # Core Abstractions
//!
//! ## Filter Description
//!
//! - [`FilterSpec`] - Filter kind, order, cutoff(s) and sample rate
//! - [`FilterKind`] - Lowpass, highpass, bandpass, bandstop
//! - [`Cutoff`] - Single corner frequency or a `(low, high)` band
//! - [`FilterFamily`] - Analog prototype family (Butterworth)
//!
//! ## Design
//!
//! - [`design`] - Validates a [`FilterSpec`] and produces [`FilterCoefficients`]
//! - [`Zpk`] - Zero/pole/gain intermediate representation
//! - [`TransferFunction`] - Numerator/denominator polynomials, used for analysis
//! - [`BiquadCoefficients`] - One second-order section, used for filtering
//!
//! ## Application
//!
//! - [`apply`] - Causal cascaded-biquad filtering with zero initial state
//! - [`impulse_response`] - Filter output for a unit impulse
//! - [`lfilter`] - Direct transfer-function filtering
//! - [`Biquad`] - Stateful Direct Form I second-order section
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build against `alloc` only:
//!
//! ```toml
//! [dependencies]
//! filtra-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use filtra_core::{FilterSpec, apply, design};
//!
//! let spec = FilterSpec::lowpass(4, 1000.0, 8000);
//! let coeffs = design(&spec).unwrap();
//!
//! let input = vec![1.0; 256];
//! let output = apply(&coeffs, &input);
//! assert_eq!(output.len(), input.len());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod apply;
pub mod biquad;
pub mod coefficients;
pub mod design;
pub mod error;
pub mod spec;

pub use apply::{apply, apply_channels, impulse_response, lfilter};
pub use biquad::{Biquad, BiquadCoefficients};
pub use coefficients::{FilterCoefficients, TransferFunction};
pub use design::{Zpk, design};
pub use error::FilterError;
pub use spec::{Cutoff, FilterFamily, FilterKind, FilterSpec};

/// Complex number type used for poles, zeros and frequency responses.
pub type Complex = num_complex::Complex<f64>;
