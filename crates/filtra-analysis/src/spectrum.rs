//! Whole-signal spectral views.

use rustfft::num_complex::Complex;

use crate::fft::Fft;
use crate::series::ResponseSeries;

/// Full complex FFT of `signal`, one bin per input sample.
pub fn fourier_transform(signal: &[f64]) -> Vec<Complex<f64>> {
    if signal.is_empty() {
        return Vec::new();
    }
    Fft::new(signal.len()).forward_full(signal)
}

/// DTFT magnitude of `signal` over `[0, nyquist)`.
///
/// For `n` samples the transform is evaluated at `n` evenly spaced
/// frequencies `k * sample_rate / (2n)`, through an FFT of `2n` points. The
/// x axis is in Hz, the y axis is `|X|`. `name` ends up in the title.
pub fn dtft_magnitude(signal: &[f64], sample_rate: u32, name: &str) -> ResponseSeries {
    let n = signal.len();
    let (x_axis, y_axis) = if n == 0 {
        (Vec::new(), Vec::new())
    } else {
        let spectrum = Fft::new(2 * n).forward_full(signal);
        let step = f64::from(sample_rate) / (2 * n) as f64;
        (
            (0..n).map(|k| k as f64 * step).collect(),
            spectrum[..n].iter().map(|c| c.norm()).collect(),
        )
    };

    ResponseSeries::line(
        x_axis,
        y_axis,
        "Frequency (Hz)",
        "Magnitude",
        format!("DTFT Mag: {name}"),
    )
}

/// Frequency of the largest value in a magnitude series, if any.
pub fn peak_frequency(series: &ResponseSeries) -> Option<f64> {
    series
        .points()
        .filter(|(_, y)| !y.is_nan())
        .fold(None, |best: Option<(f64, f64)>, (x, y)| match best {
            Some((_, top)) if top >= y => best,
            _ => Some((x, y)),
        })
        .map(|(x, _)| x)
}
