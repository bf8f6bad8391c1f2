//! Analysis session over one loaded signal.

use std::fs::File;
use std::io::{BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};

use filtra_analysis::{
    ChartBundle, PreviewOptions, ResponseBundle, ResponseSeries, Spectrogram, chart, preview,
    response, spectrogram, spectrum,
};
use filtra_config::AnalyzerConfig;
use filtra_core::{Complex, FilterCoefficients, FilterSpec, apply, apply_channels, design};
use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::wav::{AudioSignal, WavSpec, read_wav_from, write_wav, write_wav_to};
use crate::{Error, Result};

/// Basic facts about the loaded signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SignalInfo {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Length in seconds.
    pub duration_secs: f64,
    /// Channel count.
    pub channels: usize,
    /// Samples per channel.
    pub frames: usize,
}

/// Serializable state of a session: computed series plus source facts.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSnapshot<'a> {
    /// Responses computed so far.
    pub plot_data: &'a ResponseBundle,
    /// Sample rate of the loaded signal.
    pub sample_rate: u32,
    /// Source path, when loaded from a UTF-8 path.
    pub file: Option<&'a str>,
}

/// Configures and creates an [`AudioAnalyzer`].
pub struct AnalyzerBuilder {
    config: AnalyzerConfig,
    sink: Box<dyn DiagnosticSink>,
}

impl AnalyzerBuilder {
    /// Uses `config` instead of the defaults. It is validated on load.
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sends diagnostics to `sink` instead of [`TracingSink`].
    pub fn sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Decodes WAV data from `source`.
    pub fn load<R: Read>(self, source: R) -> Result<AudioAnalyzer> {
        self.config.validate()?;
        match read_wav_from(source, self.config.max_samples) {
            Ok(signal) => Ok(self.finish(signal, None)),
            Err(error) => Err(self.reject("load", error)),
        }
    }

    /// Decodes the WAV file at `path`.
    pub fn load_path(self, path: impl AsRef<Path>) -> Result<AudioAnalyzer> {
        let path = path.as_ref();
        self.config.validate()?;
        let signal = File::open(path)
            .map_err(Error::from)
            .and_then(|file| read_wav_from(BufReader::new(file), self.config.max_samples));
        match signal {
            Ok(signal) => Ok(self.finish(signal, Some(path.to_path_buf()))),
            Err(error) => Err(self.reject("load", error)),
        }
    }

    /// Wraps an already decoded signal.
    pub fn from_signal(self, signal: AudioSignal) -> Result<AudioAnalyzer> {
        self.config.validate()?;
        let samples = signal.frames() * signal.channel_count();
        if samples > self.config.max_samples {
            let error = Error::InputTooLarge {
                samples: samples as u64,
                limit: self.config.max_samples,
            };
            return Err(self.reject("load", error));
        }
        Ok(self.finish(signal, None))
    }

    fn reject(&self, operation: &'static str, error: Error) -> Error {
        self.sink.record(&Diagnostic::Failed {
            operation,
            error: &error,
        });
        error
    }

    fn finish(self, signal: AudioSignal, source: Option<PathBuf>) -> AudioAnalyzer {
        self.sink.record(&Diagnostic::Loaded {
            sample_rate: signal.sample_rate(),
            channels: signal.channel_count(),
            frames: signal.frames(),
        });
        AudioAnalyzer {
            config: self.config,
            sink: self.sink,
            source,
            original: signal,
            filtered: None,
            responses: ResponseBundle::new(),
        }
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self {
            config: AnalyzerConfig::default(),
            sink: Box::new(TracingSink),
        }
    }
}

/// One loaded signal and everything derived from it.
///
/// Holds the original signal, at most one filtered version and the response
/// series computed so far. Failed operations leave all of it untouched.
/// Mutating operations take `&mut self`; share behind a lock if needed.
pub struct AudioAnalyzer {
    config: AnalyzerConfig,
    sink: Box<dyn DiagnosticSink>,
    source: Option<PathBuf>,
    original: AudioSignal,
    filtered: Option<AudioSignal>,
    responses: ResponseBundle,
}

impl AudioAnalyzer {
    /// Starts configuring a session.
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::default()
    }

    /// Loads WAV data with the default config.
    pub fn load<R: Read>(source: R) -> Result<Self> {
        Self::builder().load(source)
    }

    /// Loads a WAV file with the default config.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().load_path(path)
    }

    /// Wraps a decoded signal with the default config.
    pub fn from_signal(signal: AudioSignal) -> Result<Self> {
        Self::builder().from_signal(signal)
    }

    /// Settings this session runs with.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The signal as loaded.
    pub fn original(&self) -> &AudioSignal {
        &self.original
    }

    /// The last successfully filtered signal, if any.
    pub fn filtered(&self) -> Option<&AudioSignal> {
        self.filtered.as_ref()
    }

    /// Response series computed so far.
    pub fn responses(&self) -> &ResponseBundle {
        &self.responses
    }

    /// Sample rate of the loaded signal.
    pub fn sample_rate(&self) -> u32 {
        self.original.sample_rate()
    }

    /// Path the signal was loaded from, when it came from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Sample rate, duration and shape of the loaded signal.
    pub fn metadata(&self) -> SignalInfo {
        SignalInfo {
            sample_rate: self.original.sample_rate(),
            duration_secs: self.original.duration_secs(),
            channels: self.original.channel_count(),
            frames: self.original.frames(),
        }
    }

    /// Designs the filter and runs it over every channel.
    ///
    /// On success the filtered slot is replaced; on failure it is unchanged.
    pub fn apply_filter(&mut self, spec: &FilterSpec) -> Result<&AudioSignal> {
        let coeffs = self.design("apply_filter", spec)?;
        let channels = apply_channels(&coeffs, self.original.channels());
        let filtered = self
            .original
            .with_channels(channels)
            .map_err(|e| self.fail("apply_filter", e))?;

        self.sink.record(&Diagnostic::FilterApplied {
            spec,
            sections: coeffs.sections().len(),
        });
        Ok(&*self.filtered.insert(filtered))
    }

    /// Computes the frequency, impulse and time-domain responses.
    ///
    /// The time-domain series filters the first channel afresh, so it does
    /// not depend on a previous [`apply_filter`](Self::apply_filter). The
    /// new series replace their counterparts in [`responses`](Self::responses)
    /// and are also returned.
    pub fn compute_responses(&mut self, spec: &FilterSpec) -> Result<ResponseBundle> {
        let coeffs = self.design("compute_responses", spec)?;
        let filtered = apply(&coeffs, self.original.first_channel());
        let bundle = response::analyze(&coeffs, &filtered, self.config.frequency_bins);

        self.sink.record(&Diagnostic::ResponsesComputed {
            spec,
            bins: self.config.frequency_bins,
        });
        self.responses.merge(bundle.clone());
        Ok(bundle)
    }

    /// Chart payloads for every stored response, reduced to `max_points`.
    pub fn export_chart_data(&self, max_points: usize) -> ChartBundle {
        let charts = chart::export(&self.responses, max_points);
        self.sink.record(&Diagnostic::ChartsExported {
            series: charts.len(),
            max_points,
        });
        charts
    }

    /// Writes the filtered or original signal to `destination`.
    ///
    /// Uses the source sample rate and width, or `output_bits` from the
    /// config when set.
    pub fn save(&self, use_filtered: bool, destination: impl AsRef<Path>) -> Result<PathBuf> {
        let destination = destination.as_ref();
        let signal = self.signal("save", use_filtered)?;
        write_wav(destination, signal, self.output_spec(signal))
            .map_err(|e| self.fail("save", e))?;

        self.sink.record(&Diagnostic::Saved {
            path: destination,
            filtered: use_filtered,
        });
        Ok(destination.to_path_buf())
    }

    /// Writes the filtered or original signal as WAV into `sink`.
    pub fn save_to_writer<W: Write + Seek>(&self, use_filtered: bool, sink: W) -> Result<()> {
        let signal = self.signal("save", use_filtered)?;
        write_wav_to(sink, signal, self.output_spec(signal)).map_err(|e| self.fail("save", e))
    }

    /// Base64 PNG of the normalized first channel.
    pub fn waveform_preview(&self) -> Result<String> {
        let options = PreviewOptions {
            width: self.config.preview_width,
            height: self.config.preview_height,
        };
        preview::waveform_png_base64(
            self.original.first_channel(),
            self.original.sample_rate(),
            options,
        )
        .map_err(|e| self.fail("waveform_preview", e.into()))
    }

    /// Full FFT of the original first channel.
    pub fn fourier_transform(&self) -> Vec<Complex> {
        let transform = spectrum::fourier_transform(self.original.first_channel());
        self.sink.record(&Diagnostic::SpectrumComputed {
            view: "fourier_transform",
            bins: transform.len(),
        });
        transform
    }

    /// DTFT magnitude of the original first channel, x axis in Hz.
    pub fn dtft_magnitude(&self) -> ResponseSeries {
        let series = spectrum::dtft_magnitude(
            self.original.first_channel(),
            self.original.sample_rate(),
            &self.display_name(),
        );
        self.sink.record(&Diagnostic::SpectrumComputed {
            view: "dtft_magnitude",
            bins: series.len(),
        });
        series
    }

    /// Spectrogram of the original first channel.
    ///
    /// Segments are `spectrogram_segment` samples long (from the config).
    pub fn spectrogram(&self) -> Spectrogram {
        let result = spectrogram::spectrogram(
            self.original.first_channel(),
            self.original.sample_rate(),
            self.config.spectrogram_segment,
            &self.display_name(),
        );
        self.sink.record(&Diagnostic::SpectrumComputed {
            view: "spectrogram",
            bins: result.num_bins(),
        });
        result
    }

    /// Interleaved samples for a playback device.
    pub fn playback_samples(&self, use_filtered: bool) -> Result<Vec<f64>> {
        Ok(self.signal("playback", use_filtered)?.interleaved())
    }

    /// Borrowed, serializable view of the session.
    pub fn snapshot(&self) -> AnalysisSnapshot<'_> {
        AnalysisSnapshot {
            plot_data: &self.responses,
            sample_rate: self.original.sample_rate(),
            file: self.source.as_deref().and_then(Path::to_str),
        }
    }

    fn display_name(&self) -> String {
        self.source
            .as_deref()
            .and_then(Path::file_name)
            .map_or_else(|| "signal".to_string(), |name| name.to_string_lossy().into_owned())
    }

    fn design(&self, operation: &'static str, spec: &FilterSpec) -> Result<FilterCoefficients> {
        design(spec).map_err(|e| self.fail(operation, e.into()))
    }

    fn signal(&self, operation: &'static str, use_filtered: bool) -> Result<&AudioSignal> {
        if !use_filtered {
            return Ok(&self.original);
        }
        self.filtered
            .as_ref()
            .ok_or_else(|| self.fail(operation, Error::NoFilteredSignal))
    }

    fn output_spec(&self, signal: &AudioSignal) -> WavSpec {
        let spec = signal.spec();
        match self.config.output_bits {
            Some(bits) => spec.with_bits(bits),
            None => spec,
        }
    }

    fn fail(&self, operation: &'static str, error: Error) -> Error {
        self.sink.record(&Diagnostic::Failed {
            operation,
            error: &error,
        });
        error
    }
}

impl std::fmt::Debug for AudioAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioAnalyzer")
            .field("config", &self.config)
            .field("source", &self.source)
            .field("info", &self.metadata())
            .field("filtered", &self.filtered.is_some())
            .field("responses", &self.responses.len())
            .finish_non_exhaustive()
    }
}
