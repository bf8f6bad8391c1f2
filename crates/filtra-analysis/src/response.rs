//! Frequency, impulse and time-domain responses of a designed filter.
//!
//! Every function takes coefficients from [`filtra_core::design`], so all
//! three views share the same cutoff normalization.

use std::f64::consts::PI;

use filtra_core::{FilterCoefficients, FilterKind};

use crate::series::{ResponseBundle, ResponseName, ResponseSeries};

/// Magnitude response at `n_points` frequencies spanning `[0, nyquist]`.
///
/// Both endpoints are included. The x axis is in Hz, the y axis is `|H|`.
pub fn frequency_response(
    coeffs: &FilterCoefficients,
    sample_rate: u32,
    n_points: usize,
) -> ResponseSeries {
    let nyquist = f64::from(sample_rate) / 2.0;
    let step = if n_points > 1 {
        nyquist / (n_points - 1) as f64
    } else {
        0.0
    };

    let x_axis: Vec<f64> = (0..n_points).map(|i| i as f64 * step).collect();
    let y_axis = x_axis
        .iter()
        .map(|&freq| magnitude_at(coeffs, freq, sample_rate))
        .collect();

    ResponseSeries::line(
        x_axis,
        y_axis,
        "Frequency (Hz)",
        "Magnitude",
        format!("{} pass filter response", coeffs.spec().kind.short_name()),
    )
}

/// Impulse response over `signal_length` samples, x axis in seconds.
pub fn impulse_response(
    coeffs: &FilterCoefficients,
    signal_length: usize,
    sample_rate: u32,
) -> ResponseSeries {
    let spec = coeffs.spec();
    ResponseSeries::line(
        time_axis(signal_length, sample_rate),
        filtra_core::impulse_response(coeffs, signal_length),
        "Time (seconds)",
        "Amplitude",
        format!(
            "Order: {} {} Pass Filter - Impulse Response",
            spec.order,
            spec.kind.title_name()
        ),
    )
}

/// Filtered signal against time in seconds.
pub fn time_domain_response(
    filtered: &[f64],
    sample_rate: u32,
    order: usize,
    kind: FilterKind,
) -> ResponseSeries {
    ResponseSeries::line(
        time_axis(filtered.len(), sample_rate),
        filtered.to_vec(),
        "Time (seconds)",
        "Amplitude",
        format!(
            "Order: {order} {} Pass Filter - Time Domain Response",
            kind.title_name()
        ),
    )
}

/// All three responses for one filter and its output.
///
/// `filtered` is the first channel of the filtered signal; its length also
/// sets the impulse response length.
pub fn analyze(coeffs: &FilterCoefficients, filtered: &[f64], n_points: usize) -> ResponseBundle {
    let spec = coeffs.spec();
    let mut bundle = ResponseBundle::new();
    bundle.insert(
        ResponseName::FrequencyResponse,
        frequency_response(coeffs, spec.sample_rate, n_points),
    );
    bundle.insert(
        ResponseName::ImpulseResponse,
        impulse_response(coeffs, filtered.len(), spec.sample_rate),
    );
    bundle.insert(
        ResponseName::TimeDomainResponse,
        time_domain_response(filtered, spec.sample_rate, spec.order, spec.kind),
    );
    bundle
}

/// Linear magnitude of the filter at `freq_hz`.
pub fn magnitude_at(coeffs: &FilterCoefficients, freq_hz: f64, sample_rate: u32) -> f64 {
    let omega = 2.0 * PI * freq_hz / f64::from(sample_rate);
    coeffs.response_at(omega).norm()
}

/// Magnitude in dB at `freq_hz`, floored at -300 dB.
pub fn magnitude_db_at(coeffs: &FilterCoefficients, freq_hz: f64, sample_rate: u32) -> f64 {
    20.0 * magnitude_at(coeffs, freq_hz, sample_rate).max(1e-15).log10()
}

fn time_axis(len: usize, sample_rate: u32) -> Vec<f64> {
    let rate = f64::from(sample_rate);
    (0..len).map(|i| i as f64 / rate).collect()
}
