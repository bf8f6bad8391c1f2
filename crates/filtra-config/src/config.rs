//! Analyzer settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Bit depths a filtered file may be written with.
pub const SUPPORTED_OUTPUT_BITS: [u16; 4] = [8, 16, 24, 32];

/// Limits and resolutions used by the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Largest accepted input, counted as frames times channels.
    pub max_samples: usize,
    /// Number of points in a frequency response.
    pub frequency_bins: usize,
    /// Point budget for each exported chart series.
    pub chart_max_points: usize,
    /// Bit depth for saved files; `None` keeps the source width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_bits: Option<u16>,
    /// Waveform preview width in pixels.
    pub preview_width: u32,
    /// Waveform preview height in pixels.
    pub preview_height: u32,
    /// Samples per spectrogram segment.
    pub spectrogram_segment: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_samples: 50_000_000,
            frequency_bins: 512,
            chart_max_points: 2000,
            output_bits: None,
            preview_width: 1000,
            preview_height: 400,
            spectrogram_segment: 256,
        }
    }
}

impl AnalyzerConfig {
    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a config, or return the defaults if the file does not exist.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save to a TOML file, creating the parent directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("max_samples", self.max_samples),
            ("frequency_bins", self.frequency_bins),
            ("chart_max_points", self.chart_max_points),
            ("preview_width", self.preview_width as usize),
            ("preview_height", self.preview_height as usize),
            ("spectrogram_segment", self.spectrogram_segment),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::invalid_value(field, "must be at least 1"));
            }
        }

        if let Some(bits) = self.output_bits
            && !SUPPORTED_OUTPUT_BITS.contains(&bits)
        {
            return Err(ConfigError::invalid_value(
                "output_bits",
                format!("{bits} is not one of {SUPPORTED_OUTPUT_BITS:?}"),
            ));
        }

        Ok(())
    }
}
