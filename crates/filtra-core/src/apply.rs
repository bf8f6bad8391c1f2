//! Running designed filters over sample buffers.
//!
//! Every function here starts from zero initial state and keeps nothing
//! between calls: identical inputs always produce identical outputs.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::biquad::Biquad;
use crate::coefficients::{FilterCoefficients, TransferFunction};

/// Filters `samples` through the cascade of second-order sections.
///
/// Causal, zero initial state, output length equals input length.
pub fn apply(coeffs: &FilterCoefficients, samples: &[f64]) -> Vec<f64> {
    let mut output = samples.to_vec();
    for section in coeffs.sections() {
        Biquad::from_coefficients(*section).process_block_inplace(&mut output);
    }
    output
}

/// Filters each channel independently.
pub fn apply_channels(coeffs: &FilterCoefficients, channels: &[Vec<f64>]) -> Vec<Vec<f64>> {
    channels.iter().map(|ch| apply(coeffs, ch)).collect()
}

/// Response to a unit impulse (`1` followed by `length - 1` zeros).
///
/// Returns an empty vector for `length == 0`.
pub fn impulse_response(coeffs: &FilterCoefficients, length: usize) -> Vec<f64> {
    if length == 0 {
        return Vec::new();
    }
    let mut impulse = vec![0.0; length];
    impulse[0] = 1.0;
    apply(coeffs, &impulse)
}

/// Filters `samples` directly with a transfer function.
///
/// Uses the transposed Direct Form II structure with zero initial state.
/// Prefer [`apply`] for high orders; this form loses precision as the
/// polynomial degree grows.
pub fn lfilter(tf: &TransferFunction, samples: &[f64]) -> Vec<f64> {
    let n = tf.b.len().max(tf.a.len());
    let a0 = tf.a.first().copied().unwrap_or(1.0);
    let coeff = |v: &[f64], i: usize| v.get(i).copied().unwrap_or(0.0) / a0;
    let b: Vec<f64> = (0..n).map(|i| coeff(&tf.b, i)).collect();
    let a: Vec<f64> = (0..n).map(|i| coeff(&tf.a, i)).collect();

    let mut state = vec![0.0; n.saturating_sub(1)];
    let mut output = Vec::with_capacity(samples.len());

    for &x in samples {
        let y = b[0] * x + state.first().copied().unwrap_or(0.0);
        for i in 0..state.len() {
            let next = state.get(i + 1).copied().unwrap_or(0.0);
            state[i] = next + b[i + 1] * x - a[i + 1] * y;
        }
        output.push(y);
    }

    output
}
