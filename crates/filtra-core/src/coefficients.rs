//! Designed filter coefficients in transfer-function and cascade forms.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::Complex;
use crate::biquad::BiquadCoefficients;
use crate::spec::FilterSpec;

/// Transfer function `H(z) = B(z) / A(z)` in powers of `z^-1`.
///
/// `b[0]` and `a[0]` are the coefficients of `z^0`; `a[0]` is normalized to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    /// Numerator coefficients.
    pub b: Vec<f64>,
    /// Denominator coefficients.
    pub a: Vec<f64>,
}

impl TransferFunction {
    /// Complex response at normalized angular frequency `omega` (rad/sample).
    ///
    /// Both polynomials are evaluated with Horner's rule in `z^-1`.
    pub fn response_at(&self, omega: f64) -> Complex {
        let z_inv = Complex::from_polar(1.0, -omega);
        let eval = |coeffs: &[f64]| {
            coeffs
                .iter()
                .rev()
                .fold(Complex::new(0.0, 0.0), |acc, &c| acc * z_inv + c)
        };
        eval(&self.b) / eval(&self.a)
    }

    /// Filter order (degree of the denominator).
    pub fn order(&self) -> usize {
        self.a.len().saturating_sub(1)
    }
}

/// Output of the designer: both representations of one filter.
///
/// The transfer function is the exported (b, a) representation. Filtering and
/// response evaluation both run through the second-order sections, which stay
/// accurate at high orders. Never mutated after design.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    spec: FilterSpec,
    transfer_function: TransferFunction,
    sections: Vec<BiquadCoefficients>,
}

impl FilterCoefficients {
    pub(crate) fn new(
        spec: FilterSpec,
        transfer_function: TransferFunction,
        sections: Vec<BiquadCoefficients>,
    ) -> Self {
        Self {
            spec,
            transfer_function,
            sections,
        }
    }

    /// The validated spec these coefficients were designed from.
    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Transfer-function (b, a) form.
    pub fn transfer_function(&self) -> &TransferFunction {
        &self.transfer_function
    }

    /// Second-order-sections form.
    pub fn sections(&self) -> &[BiquadCoefficients] {
        &self.sections
    }

    /// Complex response at `omega` (rad/sample), the product of the cascade
    /// sections.
    ///
    /// The expanded polynomial form loses precision when the poles crowd
    /// `z = 1` (low cutoffs at audio rates), so every magnitude goes through
    /// the sections. Use [`TransferFunction::response_at`] for the (b, a) form.
    pub fn response_at(&self, omega: f64) -> Complex {
        self.sections
            .iter()
            .fold(Complex::new(1.0, 0.0), |acc, s| acc * s.response_at(omega))
    }

    /// Magnitude at `freq_hz`.
    pub fn magnitude_at(&self, freq_hz: f64) -> f64 {
        let omega = core::f64::consts::PI * freq_hz / self.spec.nyquist();
        self.response_at(omega).norm()
    }

    /// True when every section has its poles inside the unit circle.
    pub fn is_stable(&self) -> bool {
        self.sections.iter().all(BiquadCoefficients::is_stable)
    }
}
