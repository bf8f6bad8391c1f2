//! FFT wrapper with windowing functions

use std::f64::consts::PI;
use std::sync::Arc;

use rustfft::{FftPlanner, num_complex::Complex};

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// Rectangular (no windowing)
    Rectangular,
    /// Periodic Hann window (raised cosine)
    #[default]
    Hann,
    /// Hamming window
    Hamming,
    /// Blackman window
    Blackman,
}

impl Window {
    /// Multiplies `buffer` by the window in place.
    pub fn apply(&self, buffer: &mut [f64]) {
        let n = buffer.len() as f64;
        let shape: fn(f64) -> f64 = match self {
            Window::Rectangular => return,
            Window::Hann => |x| 0.5 * (1.0 - x.cos()),
            Window::Hamming => |x| 0.54 - 0.46 * x.cos(),
            Window::Blackman => |x| 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
        };
        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample *= shape(2.0 * PI * i as f64 / n);
        }
    }

    /// Window coefficients for `size` samples.
    pub fn coefficients(&self, size: usize) -> Vec<f64> {
        let mut coeffs = vec![1.0; size];
        self.apply(&mut coeffs);
        coeffs
    }
}

/// Forward FFT of a fixed size, planned once.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Plans a forward FFT of `size` points. `size` must be non-zero.
    pub fn new(size: usize) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(size);
        Self { fft, size }
    }

    /// FFT size in points.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Full complex spectrum of real `input`.
    ///
    /// The input is zero-padded or truncated to the FFT size.
    pub fn forward_full(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);
        buffer
    }

    /// Positive-frequency half of the spectrum (`size / 2 + 1` bins, DC to
    /// Nyquist).
    pub fn forward(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut spectrum = self.forward_full(input);
        spectrum.truncate(self.size / 2 + 1);
        spectrum
    }
}

impl std::fmt::Debug for Fft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fft").field("size", &self.size).finish_non_exhaustive()
    }
}

/// Magnitude in dB, floored at -200 dB.
pub fn magnitude_db(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum
        .iter()
        .map(|c| 20.0 * c.norm().max(1e-10).log10())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_hann() {
        let mut buffer = vec![1.0; 100];
        Window::Hann.apply(&mut buffer);

        // Periodic Hann: 0 at the start, 1 at the centre
        assert!(buffer[0] < 1e-12);
        assert!(buffer[99] < 0.01);
        assert!((buffer[50] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rectangular_is_identity() {
        assert_eq!(Window::Rectangular.coefficients(4), vec![1.0; 4]);
    }

    #[test]
    fn test_dc_detection() {
        let fft = Fft::new(256);
        let spectrum = fft.forward(&[1.0; 256]);
        assert_eq!(spectrum.len(), 129);

        let dc_mag = spectrum[0].norm();
        let other_mag: f64 = spectrum[1..].iter().map(|c| c.norm()).sum();
        assert!((dc_mag - 256.0).abs() < 1e-9);
        assert!(other_mag < 1e-9);
    }

    #[test]
    fn test_sine_lands_in_its_bin() {
        let fft = Fft::new(256);
        let input: Vec<f64> = (0..256)
            .map(|i| (2.0 * PI * 10.0 * i as f64 / 256.0).sin())
            .collect();
        let db = magnitude_db(&fft.forward(&input));
        let peak = db
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, &m)| if m > best.1 { (i, m) } else { best });
        assert_eq!(peak.0, 10);
        assert!(db[40] < -100.0);
    }

    #[test]
    fn test_short_input_is_zero_padded() {
        let fft = Fft::new(8);
        let full = fft.forward_full(&[1.0]);
        assert_eq!(full.len(), 8);
        assert!(full.iter().all(|c| (c.norm() - 1.0).abs() < 1e-12));
    }
}
