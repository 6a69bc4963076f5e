//! Centralized path resolution for platform-appropriate user data directories.
//!
//! In development mode (cargo run), paths resolve to local directories.
//! In installed mode, paths resolve to platform-specific locations:
//! - Windows: `%APPDATA%\Captionsmith\`
//! - macOS: `~/Library/Application Support/Captionsmith/`
//! - Linux: `~/.config/captionsmith/`

use std::path::PathBuf;

/// Returns true when running in development mode (cargo run).
pub fn is_dev_mode() -> bool {
    std::env::var("CARGO").is_ok() || cfg!(debug_assertions)
}

/// Platform-appropriate config directory.
///
/// - Dev mode: current directory
/// - Linux: `~/.config/captionsmith/`
/// - Windows/macOS: platform config dir + `Captionsmith`
pub fn config_dir() -> Option<PathBuf> {
    if is_dev_mode() {
        return Some(PathBuf::from("."));
    }

    #[cfg(target_os = "linux")]
    {
        dirs::config_dir().map(|p| p.join("captionsmith"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        dirs::config_dir().map(|p| p.join("Captionsmith"))
    }
}

/// Path to the config file.
///
/// - Dev mode: `./config.json`
/// - Installed: `{config_dir}/config.json`
pub fn config_file() -> PathBuf {
    config_dir()
        .map(|p| p.join("config.json"))
        .unwrap_or_else(|| PathBuf::from("config.json"))
}
