//! WAV file reading and writing.
//!
//! Samples are held as `f64` in `[-1, 1]`, one vector per channel. Integer
//! PCM is scaled by `2^(bits-1)`; float PCM is taken as-is.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavReader, WavWriter};

use crate::{Error, Result};

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
    /// Sample encoding.
    pub format: WavFormat,
}

impl WavSpec {
    /// Same spec with a different bit depth.
    ///
    /// 32 bits is written as float, anything narrower as integer PCM.
    pub fn with_bits(self, bits_per_sample: u16) -> Self {
        if bits_per_sample == self.bits_per_sample {
            return self;
        }
        Self {
            bits_per_sample,
            format: if bits_per_sample == 32 {
                WavFormat::IeeeFloat
            } else {
                WavFormat::Pcm
            },
            ..self
        }
    }
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
            format: WavFormat::Pcm,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            format: match spec.sample_format {
                SampleFormat::Float => WavFormat::IeeeFloat,
                SampleFormat::Int => WavFormat::Pcm,
            },
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: match spec.format {
                WavFormat::IeeeFloat => SampleFormat::Float,
                WavFormat::Pcm => SampleFormat::Int,
            },
        }
    }
}

/// Decoded audio: one sample vector per channel plus the source format.
///
/// All channels have the same length. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSignal {
    channels: Vec<Vec<f64>>,
    spec: WavSpec,
}

impl AudioSignal {
    /// Builds a signal from per-channel samples.
    ///
    /// `spec.channels` is set from `channels.len()`.
    pub fn new(channels: Vec<Vec<f64>>, spec: WavSpec) -> Result<Self> {
        let Some(first) = channels.first() else {
            return Err(Error::InvalidSignal("signal has no channels".into()));
        };
        if channels.iter().any(|ch| ch.len() != first.len()) {
            return Err(Error::InvalidSignal(
                "channels have different lengths".into(),
            ));
        }
        if spec.sample_rate == 0 {
            return Err(Error::InvalidSignal("sample rate must be positive".into()));
        }
        let count = u16::try_from(channels.len())
            .map_err(|_| Error::InvalidSignal("too many channels".into()))?;
        Ok(Self {
            channels,
            spec: WavSpec {
                channels: count,
                ..spec
            },
        })
    }

    /// 16-bit mono signal.
    pub fn mono(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        Self::new(
            vec![samples],
            WavSpec {
                sample_rate,
                ..WavSpec::default()
            },
        )
    }

    /// Builds a signal from interleaved frames.
    pub fn from_interleaved(samples: &[f64], spec: WavSpec) -> Result<Self> {
        let count = usize::from(spec.channels.max(1));
        let mut channels = vec![Vec::with_capacity(samples.len() / count); count];
        for frame in samples.chunks_exact(count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Self::new(channels, spec)
    }

    /// A signal with the same format holding different samples.
    pub fn with_channels(&self, channels: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(channels, self.spec)
    }

    /// Samples, one vector per channel.
    pub fn channels(&self) -> &[Vec<f64>] {
        &self.channels
    }

    /// First channel; every signal has at least one.
    pub fn first_channel(&self) -> &[f64] {
        &self.channels[0]
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn frames(&self) -> usize {
        self.channels[0].len()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    /// Format the signal was decoded from, or will be written with.
    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.frames() as f64 / f64::from(self.spec.sample_rate)
    }

    /// Frames interleaved channel by channel.
    pub fn interleaved(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.frames() * self.channel_count());
        for i in 0..self.frames() {
            out.extend(self.channels.iter().map(|ch| ch[i]));
        }
        out
    }
}

/// Read a WAV file.
///
/// # Example
/// ```ignore
/// let signal = read_wav("input.wav")?;
/// println!("Loaded {} frames at {} Hz", signal.frames(), signal.sample_rate());
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<AudioSignal> {
    read_wav_from(BufReader::new(File::open(path)?), usize::MAX)
}

/// Read WAV data from any reader, refusing inputs over `max_samples`.
///
/// The limit counts samples across all channels and is checked from the
/// header, before any sample is decoded.
pub fn read_wav_from<R: Read>(source: R, max_samples: usize) -> Result<AudioSignal> {
    let reader = WavReader::new(source)?;
    let hound_spec = reader.spec();
    let total = u64::from(reader.len());
    if total > max_samples as u64 {
        return Err(Error::InputTooLarge {
            samples: total,
            limit: max_samples,
        });
    }

    let spec = WavSpec::from(hound_spec);
    let interleaved: Vec<f64> = match hound_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let max_val = int_scale(spec.bits_per_sample);
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / max_val))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    AudioSignal::from_interleaved(&interleaved, spec)
}

/// Write a signal to a WAV file using `spec` for the sample format.
///
/// # Example
/// ```ignore
/// let signal = AudioSignal::mono(vec![0.0; 48000], 48000)?;
/// write_wav("output.wav", &signal, signal.spec())?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, signal: &AudioSignal, spec: WavSpec) -> Result<()> {
    let writer = WavWriter::create(path, hound_spec_for(signal, spec))?;
    write_samples(writer, signal, spec)
}

/// Write a signal to any seekable writer.
pub fn write_wav_to<W: Write + Seek>(sink: W, signal: &AudioSignal, spec: WavSpec) -> Result<()> {
    let writer = WavWriter::new(sink, hound_spec_for(signal, spec))?;
    write_samples(writer, signal, spec)
}

/// Encode a signal as WAV bytes in memory.
pub fn write_wav_bytes(signal: &AudioSignal, spec: WavSpec) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    write_wav_to(&mut cursor, signal, spec)?;
    Ok(cursor.into_inner())
}

fn hound_spec_for(signal: &AudioSignal, spec: WavSpec) -> hound::WavSpec {
    hound::WavSpec::from(WavSpec {
        channels: signal.spec.channels,
        ..spec
    })
}

fn write_samples<W: Write + Seek>(
    mut writer: WavWriter<W>,
    signal: &AudioSignal,
    spec: WavSpec,
) -> Result<()> {
    let samples = signal.interleaved();
    match spec.format {
        WavFormat::IeeeFloat => {
            for &sample in &samples {
                writer.write_sample(sample as f32)?;
            }
        }
        WavFormat::Pcm => {
            let max_val = int_scale(spec.bits_per_sample);
            for &sample in &samples {
                let int_sample = (sample * max_val).round().clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

fn int_scale(bits: u16) -> f64 {
    f64::from(1u32 << (bits.clamp(1, 32) - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sine(len: usize) -> Vec<f64> {
        (0..len).map(|i| (i as f64 / 100.0).sin() * 0.9).collect()
    }

    #[test]
    fn test_roundtrip_f32() {
        let signal = AudioSignal::new(
            vec![sine(1000)],
            WavSpec {
                channels: 1,
                sample_rate: 48000,
                bits_per_sample: 32,
                format: WavFormat::IeeeFloat,
            },
        )
        .unwrap();

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &signal, signal.spec()).unwrap();

        let loaded = read_wav(file.path()).unwrap();
        assert_eq!(loaded.spec(), signal.spec());
        for (a, b) in signal.first_channel().iter().zip(loaded.first_channel()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_roundtrip_i16_stereo() {
        let left = sine(500);
        let right: Vec<f64> = left.iter().map(|s| -s).collect();
        let signal = AudioSignal::new(
            vec![left, right],
            WavSpec {
                sample_rate: 44100,
                ..WavSpec::default()
            },
        )
        .unwrap();

        let bytes = write_wav_bytes(&signal, signal.spec()).unwrap();
        let loaded = read_wav_from(Cursor::new(bytes), usize::MAX).unwrap();

        assert_eq!(loaded.channel_count(), 2);
        assert_eq!(loaded.frames(), 500);
        assert_eq!(loaded.sample_rate(), 44100);
        for (a, b) in signal.channels()[1].iter().zip(&loaded.channels()[1]) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn test_limit_checked_before_decoding() {
        let signal = AudioSignal::mono(vec![0.0; 100], 8000).unwrap();
        let bytes = write_wav_bytes(&signal, signal.spec()).unwrap();
        let err = read_wav_from(Cursor::new(bytes), 99).unwrap_err();
        assert!(matches!(err, Error::InputTooLarge { samples: 100, limit: 99 }));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = read_wav_from(Cursor::new(b"definitely not a wav".to_vec()), usize::MAX)
            .unwrap_err();
        assert!(matches!(err, Error::Wav(_)));
    }

    #[test]
    fn test_interleave_round_trip() {
        let spec = WavSpec {
            channels: 2,
            ..WavSpec::default()
        };
        let signal = AudioSignal::from_interleaved(&[1.0, 2.0, 3.0, 4.0], spec).unwrap();
        assert_eq!(signal.channels(), &[vec![1.0, 3.0], vec![2.0, 4.0]]);
        assert_eq!(signal.interleaved(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_ragged_channels_rejected() {
        let err = AudioSignal::new(vec![vec![0.0; 3], vec![0.0; 2]], WavSpec::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSignal(_)));
        assert!(AudioSignal::new(Vec::new(), WavSpec::default()).is_err());
    }

    #[test]
    fn test_with_bits_switches_format() {
        let spec = WavSpec::default();
        assert_eq!(spec.with_bits(32).format, WavFormat::IeeeFloat);
        assert_eq!(spec.with_bits(24).format, WavFormat::Pcm);
        assert_eq!(spec.with_bits(16), spec);
    }
}
