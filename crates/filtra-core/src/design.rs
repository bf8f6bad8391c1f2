//! Butterworth IIR filter design.
//!
//! The designer works in zero/pole/gain form throughout:
//!
//! 1. Normalize cutoff(s) by Nyquist and pre-warp them for the bilinear map
//! 2. Place the analog Butterworth prototype poles on the unit circle
//! 3. Transform the prototype to lowpass/highpass/bandpass/bandstop
//! 4. Map to the z-plane with the bilinear transform
//! 5. Expand to a transfer function and group into second-order sections
//!
//! Step 3 is the only place that branches on [`FilterKind`]; every consumer
//! (filtering and each response analysis) goes through [`design`].

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use core::f64::consts::PI;

use crate::Complex;
use crate::biquad::BiquadCoefficients;
use crate::coefficients::{FilterCoefficients, TransferFunction};
use crate::error::FilterError;
use crate::spec::{Cutoff, FilterFamily, FilterKind, FilterSpec};

/// Sample rate of the normalized bilinear map (frequencies in half-cycles/sample).
const BILINEAR_FS: f64 = 2.0;

/// Imaginary parts below this are treated as real when pairing roots.
const REAL_TOLERANCE: f64 = 1e-10;

/// Zero/pole/gain representation of a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Zpk {
    /// Transfer function zeros.
    pub zeros: Vec<Complex>,
    /// Transfer function poles.
    pub poles: Vec<Complex>,
    /// System gain.
    pub gain: f64,
}

impl Zpk {
    fn relative_degree(&self) -> usize {
        self.poles.len().saturating_sub(self.zeros.len())
    }
}

/// Designs a digital filter from `spec`.
///
/// Validation runs first; an invalid spec fails before any numeric work.
///
/// ```rust
/// use filtra_core::{FilterSpec, design};
///
/// let coeffs = design(&FilterSpec::lowpass(4, 1000.0, 8000)).unwrap();
/// let db = 20.0 * coeffs.magnitude_at(1000.0).log10();
/// assert!((db + 3.01).abs() < 0.1);
/// ```
pub fn design(spec: &FilterSpec) -> Result<FilterCoefficients, FilterError> {
    spec.validate()?;

    let zpk = match spec.family {
        FilterFamily::Butterworth => butterworth_zpk(spec)?,
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        kind = %spec.kind,
        order = spec.order,
        poles = zpk.poles.len(),
        "designed butterworth filter"
    );

    let transfer_function = zpk_to_tf(&zpk);
    let sections = zpk_to_sos(&zpk);
    Ok(FilterCoefficients::new(*spec, transfer_function, sections))
}

/// Digital zero/pole/gain for a validated Butterworth spec.
pub fn butterworth_zpk(spec: &FilterSpec) -> Result<Zpk, FilterError> {
    let prototype = butterworth_prototype(spec.order);

    let analog = match (spec.kind, spec.normalized_cutoff()) {
        (FilterKind::Lowpass, Cutoff::Single(wn)) => lp_to_lp(&prototype, prewarp(wn)),
        (FilterKind::Highpass, Cutoff::Single(wn)) => lp_to_hp(&prototype, prewarp(wn)),
        (FilterKind::Bandpass, Cutoff::Band(lo, hi)) => {
            let (lo, hi) = (prewarp(lo), prewarp(hi));
            lp_to_bp(&prototype, libm::sqrt(lo * hi), hi - lo)
        }
        (FilterKind::Bandstop, Cutoff::Band(lo, hi)) => {
            let (lo, hi) = (prewarp(lo), prewarp(hi));
            lp_to_bs(&prototype, libm::sqrt(lo * hi), hi - lo)
        }
        (kind, cutoff) => {
            return Err(FilterError::CutoffArity {
                kind,
                expected: kind.cutoff_count(),
                found: cutoff.count(),
            });
        }
    };

    Ok(bilinear(&analog, BILINEAR_FS))
}

/// Maps a normalized frequency (fraction of Nyquist) to the analog frequency
/// the bilinear transform will land on it.
fn prewarp(wn: f64) -> f64 {
    2.0 * BILINEAR_FS * libm::tan(PI * wn / BILINEAR_FS)
}

/// Analog Butterworth lowpass prototype with unit cutoff.
///
/// Poles at `-exp(j*pi*m/(2n))` for `m = -n+1, -n+3, ..., n-1`, no zeros.
pub fn butterworth_prototype(order: usize) -> Zpk {
    let n = order as f64;
    let poles = (0..order)
        .map(|k| {
            let m = -(n - 1.0) + 2.0 * k as f64;
            -Complex::from_polar(1.0, PI * m / (2.0 * n))
        })
        .collect();

    Zpk {
        zeros: Vec::new(),
        poles,
        gain: 1.0,
    }
}

fn lp_to_lp(proto: &Zpk, wo: f64) -> Zpk {
    let degree = proto.relative_degree();
    Zpk {
        zeros: proto.zeros.iter().map(|z| z * wo).collect(),
        poles: proto.poles.iter().map(|p| p * wo).collect(),
        gain: proto.gain * libm::pow(wo, degree as f64),
    }
}

fn lp_to_hp(proto: &Zpk, wo: f64) -> Zpk {
    let degree = proto.relative_degree();
    let mut zeros: Vec<Complex> = proto.zeros.iter().map(|z| wo / z).collect();
    zeros.extend(core::iter::repeat_n(Complex::new(0.0, 0.0), degree));

    Zpk {
        zeros,
        poles: proto.poles.iter().map(|p| wo / p).collect(),
        gain: proto.gain * (product_neg(&proto.zeros) / product_neg(&proto.poles)).re,
    }
}

fn lp_to_bp(proto: &Zpk, wo: f64, bw: f64) -> Zpk {
    let degree = proto.relative_degree();
    let split = |roots: &[Complex]| -> Vec<Complex> {
        let scaled: Vec<Complex> = roots.iter().map(|r| r * (bw / 2.0)).collect();
        let upper = scaled.iter().map(|&r| r + (r * r - wo * wo).sqrt());
        let lower = scaled.iter().map(|&r| r - (r * r - wo * wo).sqrt());
        upper.chain(lower).collect()
    };

    let mut zeros = split(&proto.zeros);
    zeros.extend(core::iter::repeat_n(Complex::new(0.0, 0.0), degree));

    Zpk {
        zeros,
        poles: split(&proto.poles),
        gain: proto.gain * libm::pow(bw, degree as f64),
    }
}

fn lp_to_bs(proto: &Zpk, wo: f64, bw: f64) -> Zpk {
    let degree = proto.relative_degree();
    let split = |roots: &[Complex]| -> Vec<Complex> {
        let inverted: Vec<Complex> = roots.iter().map(|r| (bw / 2.0) / r).collect();
        let upper = inverted.iter().map(|&r| r + (r * r - wo * wo).sqrt());
        let lower = inverted.iter().map(|&r| r - (r * r - wo * wo).sqrt());
        upper.chain(lower).collect()
    };

    // Zeros at infinity move to the stopband centre, +/- j*wo.
    let mut zeros = split(&proto.zeros);
    zeros.extend(core::iter::repeat_n(Complex::new(0.0, wo), degree));
    zeros.extend(core::iter::repeat_n(Complex::new(0.0, -wo), degree));

    Zpk {
        zeros,
        poles: split(&proto.poles),
        gain: proto.gain * (product_neg(&proto.zeros) / product_neg(&proto.poles)).re,
    }
}

/// Bilinear transform of an analog zpk; zeros at infinity land on `z = -1`.
fn bilinear(analog: &Zpk, fs: f64) -> Zpk {
    let degree = analog.relative_degree();
    let fs2 = 2.0 * fs;

    let mut zeros: Vec<Complex> = analog.zeros.iter().map(|z| (fs2 + z) / (fs2 - z)).collect();
    zeros.extend(core::iter::repeat_n(Complex::new(-1.0, 0.0), degree));

    let num = analog
        .zeros
        .iter()
        .fold(Complex::new(1.0, 0.0), |acc, z| acc * (fs2 - z));
    let den = analog
        .poles
        .iter()
        .fold(Complex::new(1.0, 0.0), |acc, p| acc * (fs2 - p));

    Zpk {
        zeros,
        poles: analog.poles.iter().map(|p| (fs2 + p) / (fs2 - p)).collect(),
        gain: analog.gain * (num / den).re,
    }
}

fn product_neg(roots: &[Complex]) -> Complex {
    roots.iter().fold(Complex::new(1.0, 0.0), |acc, r| acc * -r)
}

/// Monic polynomial with the given roots, highest power first.
fn poly(roots: &[Complex]) -> Vec<f64> {
    let mut coeffs = vec![Complex::new(1.0, 0.0)];
    for root in roots {
        let mut next = vec![Complex::new(0.0, 0.0); coeffs.len() + 1];
        for (i, &c) in coeffs.iter().enumerate() {
            next[i] += c;
            next[i + 1] -= c * root;
        }
        coeffs = next;
    }
    coeffs.into_iter().map(|c| c.re).collect()
}

/// Expands a digital zpk into `(b, a)` polynomials in `z^-1`.
pub fn zpk_to_tf(zpk: &Zpk) -> TransferFunction {
    let b = poly(&zpk.zeros).into_iter().map(|c| c * zpk.gain).collect();
    let a = poly(&zpk.poles);
    TransferFunction { b, a }
}

/// A real polynomial factor of degree 1 or 2, `1 + c1 z^-1 + c2 z^-2`.
#[derive(Debug, Clone, Copy)]
struct Factor {
    c1: f64,
    c2: f64,
    /// Root used to match zero factors to pole factors.
    anchor: Complex,
    first_order: bool,
    /// Largest root magnitude; pole factors are cascaded in increasing order.
    radius: f64,
}

/// Groups roots into real first/second-order factors.
///
/// Complex roots contribute one factor per conjugate pair; real roots are
/// sorted and paired, leaving at most one first-order factor.
fn real_factors(roots: &[Complex]) -> Vec<Factor> {
    let mut factors = Vec::with_capacity(roots.len().div_ceil(2));
    let mut reals: Vec<f64> = Vec::new();

    for &r in roots {
        if r.im.abs() <= REAL_TOLERANCE {
            reals.push(r.re);
        } else if r.im > 0.0 {
            factors.push(Factor {
                c1: -2.0 * r.re,
                c2: r.norm_sqr(),
                anchor: r,
                first_order: false,
                radius: r.norm(),
            });
        }
    }

    reals.sort_by(f64::total_cmp);
    let mut pairs = reals.chunks_exact(2);
    for pair in pairs.by_ref() {
        let (r1, r2) = (pair[0], pair[1]);
        factors.push(Factor {
            c1: -(r1 + r2),
            c2: r1 * r2,
            anchor: Complex::new((r1 + r2) / 2.0, 0.0),
            first_order: false,
            radius: r1.abs().max(r2.abs()),
        });
    }
    if let [r] = pairs.remainder() {
        factors.push(Factor {
            c1: -r,
            c2: 0.0,
            anchor: Complex::new(*r, 0.0),
            first_order: true,
            radius: r.abs(),
        });
    }

    factors
}

/// Groups a digital zpk into cascaded second-order sections.
///
/// Pole factors are ordered by increasing radius so the most resonant
/// section runs last; each takes the nearest remaining zero factor, with
/// first-order poles preferring first-order zeros. The gain is folded into
/// the first section.
pub fn zpk_to_sos(zpk: &Zpk) -> Vec<BiquadCoefficients> {
    let mut pole_factors = real_factors(&zpk.poles);
    pole_factors.sort_by(|a, b| a.radius.total_cmp(&b.radius));
    let mut zero_factors = real_factors(&zpk.zeros);

    let mut sections = Vec::with_capacity(pole_factors.len());
    for pole in &pole_factors {
        let best = zero_factors
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let key = |z: &Factor| (z.first_order != pole.first_order, (z.anchor - pole.anchor).norm());
                let (ka, kb) = (key(a), key(b));
                ka.0.cmp(&kb.0).then(ka.1.total_cmp(&kb.1))
            })
            .map(|(i, _)| i);

        let (b1, b2) = match best {
            Some(i) => {
                let zero = zero_factors.swap_remove(i);
                (zero.c1, zero.c2)
            }
            None => (0.0, 0.0),
        };
        sections.push(BiquadCoefficients::new(1.0, b1, b2, 1.0, pole.c1, pole.c2));
    }

    // Zero factors left over (more zeros than poles) become FIR sections.
    for zero in zero_factors {
        sections.push(BiquadCoefficients::new(1.0, zero.c1, zero.c2, 1.0, 0.0, 0.0));
    }

    if let Some(first) = sections.first_mut() {
        first.b0 *= zpk.gain;
        first.b1 *= zpk.gain;
        first.b2 *= zpk.gain;
    } else {
        sections.push(BiquadCoefficients {
            b0: zpk.gain,
            ..BiquadCoefficients::IDENTITY
        });
    }

    sections
}
