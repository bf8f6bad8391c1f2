//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/filtra/config.toml`
//! - macOS: `~/Library/Application Support/filtra/config.toml`
//! - Windows: `%APPDATA%\filtra\config.toml`

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "filtra";

/// Name of the configuration file inside [`user_config_dir`].
pub const CONFIG_FILE: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// Falls back to the current directory if the platform has no config dir.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user configuration file.
pub fn config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE)
}
