//! Integration tests for filtra-analysis.
//!
//! Designs real filters, runs them over synthetic signals and checks the
//! series and chart payloads that come out the other end.

use std::f64::consts::PI;

use filtra_analysis::{ResponseName, chart, downsample, response};
use filtra_core::{FilterSpec, apply, design};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sine(freq_hz: f64, sample_rate: u32, num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|i| (2.0 * PI * freq_hz * i as f64 / f64::from(sample_rate)).sin())
        .collect()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn lowpass_scenario_bundle_shapes() {
    let signal = sine(440.0, 8000, 8000);
    let coeffs = design(&FilterSpec::lowpass(4, 1000.0, 8000)).unwrap();
    let filtered = apply(&coeffs, &signal);
    assert_eq!(filtered.len(), 8000);

    let bundle = response::analyze(&coeffs, &filtered, 512);
    assert_eq!(bundle.len(), 3);

    let freq = bundle.get(ResponseName::FrequencyResponse).unwrap();
    assert_eq!(freq.len(), 512);

    let ir = bundle.get(ResponseName::ImpulseResponse).unwrap();
    assert_eq!(ir.len(), 8000);
    assert_eq!(ir.x_axis[0], 0.0);
    assert!(*ir.x_axis.last().unwrap() < 1.0);

    let time = bundle.get(ResponseName::TimeDomainResponse).unwrap();
    assert_eq!(time.y_axis, filtered);
}

#[test]
fn bandpass_scenario_attenuates_outside_band() {
    let coeffs = design(&FilterSpec::bandpass(6, 300.0, 3000.0, 16000)).unwrap();
    let series = response::frequency_response(&coeffs, 16000, 2048);

    let peak = series
        .points()
        .fold((0.0, f64::MIN), |best, p| if p.1 > best.1 { p } else { best });
    assert!((300.0..=3000.0).contains(&peak.0));
    assert!((peak.1 - 1.0).abs() < 1e-3);

    for (freq, mag) in series.points() {
        if freq < 100.0 || freq > 6000.0 {
            assert!(mag < 0.1, "{freq} Hz passes with magnitude {mag}");
        }
    }
}

#[test]
fn long_series_export_respects_budget() {
    let coeffs = design(&FilterSpec::highpass(2, 200.0, 48000)).unwrap();
    let signal = sine(1000.0, 48000, 100_000);
    let filtered = apply(&coeffs, &signal);

    let bundle = response::analyze(&coeffs, &filtered, 512);
    let charts = chart::export(&bundle, 2000);

    assert_eq!(charts.len(), 3);
    let time = &charts["filter_time_domain_response"];
    assert!((1000..=2200).contains(&time.labels.len()));
    assert_eq!(charts["filter_frequency_response"].labels.len(), 512);

    let json = serde_json::to_string(&charts).unwrap();
    assert!(json.contains("\"filter_impulse_response\""));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn downsample_stays_near_budget_and_keeps_extremes(
        values in prop::collection::vec(-1.0e3f64..1.0e3, 2000..6000),
        max_points in 10usize..20,
    ) {
        let series = filtra_analysis::ResponseSeries::line(
            (0..values.len()).map(|i| i as f64).collect(),
            values.clone(),
            "x",
            "y",
            "",
        );
        let out = downsample(&series, max_points);

        let half = max_points / 2;
        let buckets = values.len().div_ceil(values.len().div_ceil(half));
        prop_assert_eq!(out.len(), 2 * buckets);
        prop_assert!(out.len() <= max_points);

        let max = values.iter().copied().fold(f64::MIN, f64::max);
        let min = values.iter().copied().fold(f64::MAX, f64::min);
        prop_assert!(out.y_axis.contains(&max));
        prop_assert!(out.y_axis.contains(&min));
        prop_assert!(out.x_axis.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn downsample_never_exceeds_budget_or_input(
        (max_points, values) in (4usize..300).prop_flat_map(|max_points| {
            (
                Just(max_points),
                prop::collection::vec(-1.0f64..1.0, max_points + 1..2 * max_points + 2),
            )
        }),
    ) {
        let series = filtra_analysis::ResponseSeries::line(
            (0..values.len()).map(|i| i as f64).collect(),
            values.clone(),
            "x",
            "y",
            "",
        );
        let out = downsample(&series, max_points);
        prop_assert!(out.len() <= max_points, "{} points for budget {}", out.len(), max_points);
        prop_assert!(out.len() < values.len());
        prop_assert!(out.x_axis.windows(2).all(|w| w[0] <= w[1]));
    }
}
