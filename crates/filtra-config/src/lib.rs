//! Configuration for the filtra audio analyzer.
//!
//! Settings live in a small TOML file:
//!
//! ```toml
//! max_samples = 50000000
//! frequency_bins = 512
//! chart_max_points = 2000
//! output_bits = 16
//! ```
//!
//! Missing keys take their defaults, so an empty file is a valid config.
//!
//! # Example
//!
//! ```rust,no_run
//! use filtra_config::{AnalyzerConfig, paths};
//!
//! let config = AnalyzerConfig::load_or_default(paths::config_path()).unwrap();
//! println!("{} frequency bins", config.frequency_bins);
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

pub use config::{AnalyzerConfig, SUPPORTED_OUTPUT_BITS};
pub use error::ConfigError;
pub use paths::{config_path, user_config_dir};
