//! STFT-based spectrogram generation
//!
//! Provides time-frequency analysis through Short-Time Fourier Transform,
//! useful for visualizing how spectral content changes over time. Each
//! segment has its mean removed and is windowed before the FFT; the result
//! is a one-sided power spectral density in dB.

use serde::{Deserialize, Serialize};

use crate::fft::{Fft, Window};

/// Power floor before conversion to dB.
const POWER_FLOOR: f64 = 1e-20;

/// Time-frequency intensity of a signal, ready for a heat-map plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrogram {
    /// Segment centres in seconds.
    pub times: Vec<f64>,
    /// Bin frequencies in Hz, DC to Nyquist.
    pub frequencies: Vec<f64>,
    /// Power spectral density in dB, `[time_frame][frequency_bin]`.
    pub intensity_db: Vec<Vec<f64>>,
    /// Horizontal axis label.
    pub x_label: String,
    /// Vertical axis label.
    pub y_label: String,
    /// Colour scale label.
    pub z_label: String,
    /// Plot title.
    pub title: String,
}

impl Spectrogram {
    fn empty(title: String) -> Self {
        Self {
            times: Vec::new(),
            frequencies: Vec::new(),
            intensity_db: Vec::new(),
            x_label: "Time [sec]".to_string(),
            y_label: "Frequency [Hz]".to_string(),
            z_label: "Intensity [dB]".to_string(),
            title,
        }
    }

    /// Number of time frames.
    pub fn num_frames(&self) -> usize {
        self.times.len()
    }

    /// Number of frequency bins per frame.
    pub fn num_bins(&self) -> usize {
        self.frequencies.len()
    }

    /// True when the signal was too short for a single frame.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Intensity at `frame` and `bin`, or `None` out of bounds.
    pub fn get(&self, frame: usize, bin: usize) -> Option<f64> {
        self.intensity_db.get(frame).and_then(|f| f.get(bin)).copied()
    }

    /// Frequency of the loudest bin in `frame`.
    pub fn peak_frequency(&self, frame: usize) -> Option<f64> {
        let spectrum = self.intensity_db.get(frame)?;
        let (peak_bin, _) = spectrum
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .max_by(|(_, a), (_, b)| a.total_cmp(b))?;
        self.frequencies.get(peak_bin).copied()
    }
}

/// STFT (Short-Time Fourier Transform) analyzer
#[derive(Debug)]
pub struct StftAnalyzer {
    sample_rate: u32,
    segment: usize,
    hop_size: usize,
    fft: Fft,
    window_coeffs: Vec<f64>,
    density_scale: f64,
}

impl StftAnalyzer {
    /// Create a new STFT analyzer.
    ///
    /// Consecutive segments overlap by `segment / 8` samples. A zero
    /// `segment` is treated as 1.
    pub fn new(sample_rate: u32, segment: usize, window: Window) -> Self {
        let segment = segment.max(1);
        let window_coeffs = window.coefficients(segment);
        let energy: f64 = window_coeffs.iter().map(|w| w * w).sum();
        let density_scale = if energy > 0.0 {
            1.0 / (f64::from(sample_rate) * energy)
        } else {
            0.0
        };

        Self {
            sample_rate,
            segment,
            hop_size: segment - segment / 8,
            fft: Fft::new(segment),
            window_coeffs,
            density_scale,
        }
    }

    /// Samples per segment.
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// Hop size between frames.
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Frequency resolution (Hz per bin).
    pub fn frequency_resolution(&self) -> f64 {
        f64::from(self.sample_rate) / self.segment as f64
    }

    /// Compute the spectrogram of `signal`, titled after `name`.
    pub fn analyze(&self, signal: &[f64], name: &str) -> Spectrogram {
        let mut spectrogram = Spectrogram::empty(format!("Spectral Content of {name}"));
        if signal.len() < self.segment {
            return spectrogram;
        }

        let rate = f64::from(self.sample_rate);
        let num_frames = (signal.len() - self.segment) / self.hop_size + 1;
        let num_bins = self.segment / 2 + 1;
        let resolution = self.frequency_resolution();

        spectrogram.frequencies = (0..num_bins).map(|k| k as f64 * resolution).collect();
        spectrogram.times = (0..num_frames)
            .map(|i| (self.segment as f64 / 2.0 + (i * self.hop_size) as f64) / rate)
            .collect();
        spectrogram.intensity_db = (0..num_frames)
            .map(|i| {
                let start = i * self.hop_size;
                self.frame_db(&signal[start..start + self.segment])
            })
            .collect();
        spectrogram
    }

    fn frame_db(&self, segment: &[f64]) -> Vec<f64> {
        let mean = segment.iter().sum::<f64>() / segment.len() as f64;
        let frame: Vec<f64> = segment
            .iter()
            .zip(&self.window_coeffs)
            .map(|(&x, &w)| (x - mean) * w)
            .collect();

        let spectrum = self.fft.forward(&frame);
        let last = spectrum.len() - 1;
        spectrum
            .iter()
            .enumerate()
            .map(|(k, c)| {
                let mut power = c.norm_sqr() * self.density_scale;
                // One-sided: fold the negative frequencies in, except at DC
                // and (for even segments) Nyquist.
                if k > 0 && (k < last || self.segment % 2 == 1) {
                    power *= 2.0;
                }
                10.0 * power.max(POWER_FLOOR).log10()
            })
            .collect()
    }
}

/// Spectrogram of `signal` with a Hann window.
///
/// `segment` samples per frame (shortened to the signal length when the
/// signal is shorter). An empty signal gives an empty spectrogram.
pub fn spectrogram(signal: &[f64], sample_rate: u32, segment: usize, name: &str) -> Spectrogram {
    let segment = segment.min(signal.len());
    if segment == 0 {
        return Spectrogram::empty(format!("Spectral Content of {name}"));
    }
    StftAnalyzer::new(sample_rate, segment, Window::Hann).analyze(signal, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(freq_hz: f64, sample_rate: u32, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / f64::from(sample_rate)).sin())
            .collect()
    }

    #[test]
    fn frame_and_bin_counts() {
        // hop = 256 - 32 = 224; (8000 - 256) / 224 + 1 = 35
        let spec = spectrogram(&tone(1000.0, 8000, 8000), 8000, 256, "tone.wav");
        assert_eq!(spec.num_frames(), 35);
        assert_eq!(spec.num_bins(), 129);
        assert_eq!(spec.intensity_db.len(), 35);
        assert!(spec.intensity_db.iter().all(|f| f.len() == 129));
        assert_eq!(spec.title, "Spectral Content of tone.wav");
    }

    #[test]
    fn axes_are_in_seconds_and_hertz() {
        let spec = spectrogram(&tone(1000.0, 8000, 8000), 8000, 256, "tone");
        assert!((spec.times[0] - 128.0 / 8000.0).abs() < 1e-12);
        assert!((spec.times[1] - spec.times[0] - 224.0 / 8000.0).abs() < 1e-12);
        assert_eq!(spec.frequencies[0], 0.0);
        assert!((spec.frequencies[128] - 4000.0).abs() < 1e-9);
    }

    #[test]
    fn tone_shows_up_in_every_frame() {
        let spec = spectrogram(&tone(1000.0, 8000, 8000), 8000, 256, "tone");
        for frame in 0..spec.num_frames() {
            let peak = spec.peak_frequency(frame).unwrap();
            assert!((peak - 1000.0).abs() <= 31.25, "frame {frame} peak {peak}");
        }
        let at_tone = spec.get(0, 32).unwrap();
        let far_away = spec.get(0, 100).unwrap();
        assert!(at_tone - far_away > 60.0, "{at_tone} vs {far_away}");
    }

    #[test]
    fn constant_offset_is_removed() {
        let signal = vec![0.75; 1024];
        let spec = spectrogram(&signal, 8000, 256, "dc");
        assert!(spec.get(0, 0).unwrap() <= -190.0);
    }

    #[test]
    fn short_signals_shrink_the_segment() {
        let spec = spectrogram(&tone(1000.0, 8000, 100), 8000, 256, "short");
        assert_eq!(spec.num_frames(), 1);
        assert_eq!(spec.num_bins(), 51);

        let empty = spectrogram(&[], 8000, 256, "empty");
        assert!(empty.is_empty());
        assert_eq!(empty.get(0, 0), None);
        assert_eq!(empty.peak_frequency(0), None);
    }

    #[test]
    fn serializes_for_plotting() {
        let spec = spectrogram(&tone(500.0, 8000, 512), 8000, 128, "tone");
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["x_label"], "Time [sec]");
        assert_eq!(json["y_label"], "Frequency [Hz]");
        assert_eq!(json["z_label"], "Intensity [dB]");
        assert_eq!(
            json["intensity_db"].as_array().unwrap().len(),
            spec.num_frames()
        );
    }
}
