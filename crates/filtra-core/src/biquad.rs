//! Biquad (bi-quadratic) filter section.
//!
//! A designed filter is stored as a cascade of second-order sections; each
//! section is a [`BiquadCoefficients`] and is run by a [`Biquad`].

use crate::Complex;

/// Coefficients of one second-order section, normalized so that `a0 = 1`.
///
/// ```text
/// H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2)
/// ```
///
/// First-order sections are represented with `b2 = a2 = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward coefficients
    pub b0: f64,
    /// Feedforward coefficient for `x[n-1]`
    pub b1: f64,
    /// Feedforward coefficient for `x[n-2]`
    pub b2: f64,
    /// Feedback coefficient for `y[n-1]`
    pub a1: f64,
    /// Feedback coefficient for `y[n-2]`
    pub a2: f64,
}

impl BiquadCoefficients {
    /// Passthrough section (`y[n] = x[n]`).
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Builds a section from raw coefficients, normalizing by `a0`.
    pub fn new(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }

    /// Complex response of this section at `z = e^{j omega}`.
    pub fn response_at(&self, omega: f64) -> Complex {
        let z1 = Complex::from_polar(1.0, -omega);
        let z2 = z1 * z1;
        let num = z2 * self.b2 + z1 * self.b1 + self.b0;
        let den = z2 * self.a2 + z1 * self.a1 + 1.0;
        num / den
    }

    /// True when both poles lie strictly inside the unit circle.
    ///
    /// Uses the stability triangle for `1 + a1 z^-1 + a2 z^-2`.
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }
}

/// Second-order IIR section with its own delay line.
///
/// Implements the Direct Form I structure:
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    coeffs: BiquadCoefficients,

    /// Input delay line: x[n-1], x[n-2]
    x1: f64,
    x2: f64,

    /// Output delay line: y[n-1], y[n-2]
    y1: f64,
    y2: f64,
}

impl Biquad {
    /// Creates a biquad with zero initial state.
    pub fn from_coefficients(coeffs: BiquadCoefficients) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2
            - c.a1 * self.y1
            - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Processes a buffer in place.
    pub fn process_block_inplace(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}
