//! Property-based tests for filtra-core filters.
//!
//! Tests design stability, length preservation and cutoff attenuation using
//! proptest for randomized specs and input.

use filtra_core::{FilterKind, FilterSpec, apply, design};
use proptest::prelude::*;

/// Builds a valid spec from normalized band positions in `(0, 1)`.
fn spec_for(kind_idx: usize, order: usize, lo: f64, width: f64, sample_rate: u32) -> FilterSpec {
    let nyquist = f64::from(sample_rate) / 2.0;
    let low = lo * nyquist;
    let high = (lo + width * (1.0 - lo)) * nyquist;
    match FilterKind::ALL[kind_idx % 4] {
        FilterKind::Lowpass => FilterSpec::lowpass(order, low, sample_rate),
        FilterKind::Highpass => FilterSpec::highpass(order, low, sample_rate),
        FilterKind::Bandpass => FilterSpec::bandpass(order, low, high, sample_rate),
        FilterKind::Bandstop => FilterSpec::bandstop(order, low, high, sample_rate),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every valid spec designs a stable filter whose output has the input's
    /// length and stays finite for bounded input.
    #[test]
    fn designed_filters_are_stable_and_length_preserving(
        kind_idx in 0usize..4,
        order in 1usize..9,
        lo in 0.02f64..0.8,
        width in 0.1f64..0.9,
        sample_rate in prop::sample::select(vec![8000u32, 16000, 44100, 48000]),
        input in prop::collection::vec(-1.0f64..=1.0, 0..512),
    ) {
        let spec = spec_for(kind_idx, order, lo, width, sample_rate);
        let coeffs = design(&spec).unwrap();
        prop_assert!(coeffs.is_stable(), "unstable design for {:?}", spec);

        let output = apply(&coeffs, &input);
        prop_assert_eq!(output.len(), input.len());
        for y in &output {
            prop_assert!(y.is_finite(), "non-finite output for {:?}", spec);
        }
    }

    /// Lowpass and highpass designs are 3 dB down at the cutoff.
    #[test]
    fn corner_frequency_is_half_power(
        highpass in any::<bool>(),
        order in 2usize..10,
        wn in 0.002f64..0.9,
    ) {
        let sample_rate = 48000;
        let cutoff = wn * 24000.0;
        let spec = if highpass {
            FilterSpec::highpass(order, cutoff, sample_rate)
        } else {
            FilterSpec::lowpass(order, cutoff, sample_rate)
        };
        let coeffs = design(&spec).unwrap();
        let db = 20.0 * coeffs.magnitude_at(cutoff).log10();
        prop_assert!((db + 3.0103).abs() < 0.5, "{} dB at cutoff for {:?}", db, spec);
    }
}
