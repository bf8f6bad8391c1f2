//! File-level tests for filtra-config.

use filtra_config::{AnalyzerConfig, ConfigError};
use tempfile::TempDir;

#[test]
fn save_creates_parent_and_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("filtra").join("config.toml");

    let config = AnalyzerConfig {
        frequency_bins: 2048,
        chart_max_points: 500,
        ..Default::default()
    };
    config.save(&path).unwrap();

    assert!(path.exists());
    assert_eq!(AnalyzerConfig::load(&path).unwrap(), config);
}

#[test]
fn load_or_default_on_missing_file() {
    let dir = TempDir::new().unwrap();
    let config = AnalyzerConfig::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, AnalyzerConfig::default());
}

#[test]
fn load_missing_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = AnalyzerConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn malformed_file_is_an_error_even_with_default_fallback() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "frequency_bins = \"many\"").unwrap();
    let err = AnalyzerConfig::load_or_default(&path).unwrap_err();
    assert!(matches!(err, ConfigError::TomlParse(_)));
}
