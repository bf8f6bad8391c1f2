//! Integration tests for filtra-io: WAV round trips and analysis sessions.

use std::f64::consts::PI;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use filtra_analysis::ResponseName;
use filtra_config::AnalyzerConfig;
use filtra_core::FilterSpec;
use filtra_io::{
    AudioAnalyzer, AudioSignal, Diagnostic, DiagnosticSink, ErrorKind, NullSink, WavSpec,
    read_wav, write_wav_bytes,
};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sine(freq_hz: f64, sample_rate: u32, num_samples: usize) -> Vec<f64> {
    (0..num_samples)
        .map(|i| 0.5 * (2.0 * PI * freq_hz * i as f64 / f64::from(sample_rate)).sin())
        .collect()
}

fn mono_analyzer(num_samples: usize, sample_rate: u32) -> AudioAnalyzer {
    let signal = AudioSignal::mono(sine(440.0, sample_rate, num_samples), sample_rate).unwrap();
    AudioAnalyzer::builder()
        .sink(NullSink)
        .from_signal(signal)
        .unwrap()
}

/// Keeps a line per event for assertions.
#[derive(Clone, Default)]
struct RecordingSink(Arc<Mutex<Vec<String>>>);

impl DiagnosticSink for RecordingSink {
    fn record(&self, event: &Diagnostic<'_>) {
        let line = match event {
            Diagnostic::Loaded { frames, .. } => format!("loaded {frames}"),
            Diagnostic::FilterApplied { spec, .. } => format!("applied {}", spec.kind),
            Diagnostic::ResponsesComputed { bins, .. } => format!("responses {bins}"),
            Diagnostic::ChartsExported { series, .. } => format!("charts {series}"),
            Diagnostic::SpectrumComputed { view, bins } => format!("{view} {bins}"),
            Diagnostic::Saved { filtered, .. } => format!("saved {filtered}"),
            Diagnostic::Failed { operation, .. } => format!("failed {operation}"),
        };
        self.0.lock().unwrap().push(line);
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn lowpass_session_scenario() {
    let mut analyzer = mono_analyzer(8000, 8000);
    let spec = FilterSpec::lowpass(4, 1000.0, 8000);

    let filtered = analyzer.apply_filter(&spec).unwrap();
    assert_eq!(filtered.frames(), 8000);

    let bundle = analyzer.compute_responses(&spec).unwrap();
    let freq = bundle.get(ResponseName::FrequencyResponse).unwrap();
    assert_eq!(freq.len(), 512);

    let ir = bundle.get(ResponseName::ImpulseResponse).unwrap();
    assert_eq!(ir.x_axis[0], 0.0);
    assert!(*ir.x_axis.last().unwrap() < 1.0);
    assert_eq!(ir.len(), 8000);
}

#[test]
fn invalid_filter_leaves_slot_unchanged() {
    let mut analyzer = mono_analyzer(1000, 8000);
    analyzer
        .apply_filter(&FilterSpec::highpass(2, 500.0, 8000))
        .unwrap();
    let before = analyzer.filtered().cloned();

    let err = analyzer
        .apply_filter(&FilterSpec::lowpass(2, 5000.0, 8000))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    assert_eq!(analyzer.filtered().cloned(), before);

    let err = FilterSpec::from_params("wobble", "2", "1000", 8000).unwrap_err();
    assert_eq!(filtra_io::Error::from(err).kind(), ErrorKind::InvalidParameter);
}

#[test]
fn band_kind_with_scalar_cutoff_is_rejected() {
    let mut analyzer = mono_analyzer(1000, 8000);
    let spec = FilterSpec::new(filtra_core::FilterKind::Bandpass, 2, 1000.0, 8000);
    let err = analyzer.compute_responses(&spec).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    assert!(analyzer.responses().is_empty());
}

#[test]
fn responses_merge_across_calls() {
    let mut analyzer = mono_analyzer(2000, 8000);
    analyzer
        .compute_responses(&FilterSpec::lowpass(2, 1000.0, 8000))
        .unwrap();
    analyzer
        .compute_responses(&FilterSpec::highpass(3, 1000.0, 8000))
        .unwrap();

    let stored = analyzer.responses();
    assert_eq!(stored.len(), 3);
    assert_eq!(
        stored.get(ResponseName::FrequencyResponse).unwrap().title,
        "high pass filter response"
    );
}

#[test]
fn chart_export_has_three_keys() {
    let mut analyzer = mono_analyzer(20_000, 8000);
    analyzer
        .compute_responses(&FilterSpec::bandpass(4, 300.0, 3000.0, 8000))
        .unwrap();

    let charts = analyzer.export_chart_data(2000);
    let json = serde_json::to_value(&charts).unwrap();
    for key in [
        "filter_frequency_response",
        "filter_impulse_response",
        "filter_time_domain_response",
    ] {
        let dataset = &json[key]["datasets"][0];
        assert_eq!(dataset["fill"], false, "{key}");
        assert_eq!(dataset["type"], "line", "{key}");
    }
    assert_eq!(charts["filter_time_domain_response"].labels.len(), 2000);
}

#[test]
fn save_without_filter_fails() {
    let analyzer = mono_analyzer(100, 8000);
    let dir = TempDir::new().unwrap();
    let err = analyzer.save(true, dir.path().join("out.wav")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoFilteredSignal);
    assert!(!dir.path().join("out.wav").exists());

    let err = analyzer.playback_samples(true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoFilteredSignal);
}

#[test]
fn save_and_reload_preserves_format() {
    let left = sine(440.0, 22050, 4410);
    let right = sine(880.0, 22050, 4410);
    let signal = AudioSignal::new(
        vec![left, right],
        WavSpec {
            sample_rate: 22050,
            ..WavSpec::default()
        },
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let input = dir.path().join("take.wav");
    std::fs::write(&input, write_wav_bytes(&signal, signal.spec()).unwrap()).unwrap();

    let mut analyzer = AudioAnalyzer::builder()
        .sink(NullSink)
        .load_path(&input)
        .unwrap();
    assert_eq!(analyzer.source_path(), Some(input.as_path()));
    analyzer
        .apply_filter(&FilterSpec::lowpass(4, 2000.0, 22050))
        .unwrap();

    let output = analyzer.save(true, dir.path().join("take_filtered.wav")).unwrap();
    let reloaded = read_wav(&output).unwrap();
    assert_eq!(reloaded.sample_rate(), 22050);
    assert_eq!(reloaded.channel_count(), 2);
    assert_eq!(reloaded.frames(), 4410);
    assert_eq!(reloaded.spec().bits_per_sample, 16);
}

#[test]
fn output_bits_override_applies_to_saves() {
    let config = AnalyzerConfig {
        output_bits: Some(24),
        ..Default::default()
    };
    let analyzer = AudioAnalyzer::builder()
        .config(config)
        .sink(NullSink)
        .from_signal(AudioSignal::mono(sine(100.0, 8000, 800), 8000).unwrap())
        .unwrap();

    let mut bytes = Cursor::new(Vec::new());
    analyzer.save_to_writer(false, &mut bytes).unwrap();
    let reloaded = filtra_io::read_wav_from(Cursor::new(bytes.into_inner()), usize::MAX).unwrap();
    assert_eq!(reloaded.spec().bits_per_sample, 24);
    assert_eq!(reloaded.frames(), 800);
}

#[test]
fn oversized_input_is_refused() {
    let signal = AudioSignal::mono(vec![0.0; 1000], 8000).unwrap();
    let bytes = write_wav_bytes(&signal, signal.spec()).unwrap();

    let config = AnalyzerConfig {
        max_samples: 999,
        ..Default::default()
    };
    let err = AudioAnalyzer::builder()
        .config(config)
        .sink(NullSink)
        .load(Cursor::new(bytes))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InputTooLarge);
}

#[test]
fn corrupt_input_is_an_io_error() {
    let err = AudioAnalyzer::builder()
        .sink(NullSink)
        .load(Cursor::new(b"RIFF....WAVEjunk".to_vec()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn metadata_preview_and_playback() {
    let analyzer = mono_analyzer(8000, 8000);

    let info = analyzer.metadata();
    assert_eq!(info.sample_rate, 8000);
    assert_eq!(info.channels, 1);
    assert_eq!(info.frames, 8000);
    assert!((info.duration_secs - 1.0).abs() < 1e-12);

    let preview = analyzer.waveform_preview().unwrap();
    assert!(preview.starts_with("iVBORw0KGgo"));

    assert_eq!(analyzer.playback_samples(false).unwrap().len(), 8000);
}

#[test]
fn silent_signal_previews() {
    let signal = AudioSignal::mono(vec![0.0; 400], 8000).unwrap();
    let analyzer = AudioAnalyzer::builder().sink(NullSink).from_signal(signal).unwrap();
    assert!(!analyzer.waveform_preview().unwrap().is_empty());
}

#[test]
fn snapshot_serializes_plot_data() {
    let mut analyzer = mono_analyzer(500, 8000);
    analyzer
        .compute_responses(&FilterSpec::lowpass(2, 1000.0, 8000))
        .unwrap();
    let json = serde_json::to_value(analyzer.snapshot()).unwrap();
    assert_eq!(json["sample_rate"], 8000);
    assert!(json["plot_data"]["impulse_response"].is_object());
    assert!(json["file"].is_null());
}

#[test]
fn spectral_views_of_the_first_channel() {
    let config = AnalyzerConfig {
        spectrogram_segment: 128,
        ..Default::default()
    };
    let sink = RecordingSink::default();
    let analyzer = AudioAnalyzer::builder()
        .config(config)
        .sink(sink.clone())
        .from_signal(AudioSignal::mono(sine(440.0, 8000, 8000), 8000).unwrap())
        .unwrap();

    assert_eq!(analyzer.fourier_transform().len(), 8000);

    let dtft = analyzer.dtft_magnitude();
    assert_eq!(dtft.len(), 8000);
    assert_eq!(dtft.title, "DTFT Mag: signal");
    let peak = filtra_analysis::spectrum::peak_frequency(&dtft).unwrap();
    assert!((peak - 440.0).abs() < 1.0, "peak at {peak} Hz");

    // hop = 128 - 16 = 112; (8000 - 128) / 112 + 1 = 71
    let spectrogram = analyzer.spectrogram();
    assert_eq!(spectrogram.num_bins(), 65);
    assert_eq!(spectrogram.num_frames(), 71);
    let frame_peak = spectrogram.peak_frequency(10).unwrap();
    assert!((frame_peak - 440.0).abs() <= 62.5, "peak at {frame_peak} Hz");

    let events = sink.0.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "loaded 8000",
            "fourier_transform 8000",
            "dtft_magnitude 8000",
            "spectrogram 65",
        ]
    );
}

#[test]
fn spectrogram_is_titled_after_the_source_file() {
    let signal = AudioSignal::mono(sine(440.0, 8000, 2000), 8000).unwrap();
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("hum.wav");
    std::fs::write(&input, write_wav_bytes(&signal, signal.spec()).unwrap()).unwrap();

    let analyzer = AudioAnalyzer::builder()
        .sink(NullSink)
        .load_path(&input)
        .unwrap();
    assert_eq!(analyzer.spectrogram().title, "Spectral Content of hum.wav");
    assert_eq!(analyzer.dtft_magnitude().title, "DTFT Mag: hum.wav");
}

#[test]
fn sink_sees_successes_and_failures() {
    let sink = RecordingSink::default();
    let mut analyzer = AudioAnalyzer::builder()
        .sink(sink.clone())
        .from_signal(AudioSignal::mono(vec![0.1; 64], 8000).unwrap())
        .unwrap();

    analyzer
        .apply_filter(&FilterSpec::lowpass(2, 1000.0, 8000))
        .unwrap();
    let _ = analyzer.apply_filter(&FilterSpec::lowpass(0, 1000.0, 8000));

    let events = sink.0.lock().unwrap().clone();
    assert_eq!(
        events,
        vec!["loaded 64", "applied low", "failed apply_filter"]
    );
}
