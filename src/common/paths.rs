//! Configuration and data paths
//!
//! Uses the directories crate for platform-appropriate locations.

use std::path::PathBuf;

/// Application name used for the config and data directories
const APP_NAME: &str = "voxtest";

/// Get the configuration directory path
///
/// - Linux: `~/.config/voxtest/`
/// - macOS: `~/Library/Application Support/voxtest/`
/// - Windows: `%APPDATA%\voxtest\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
///
/// `VOXTEST_CONFIG` overrides the platform location.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("VOXTEST_CONFIG") {
        return Some(PathBuf::from(path));
    }
    config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_is_valid() {
        let dir = config_dir();
        assert!(dir.is_some());
    }

    #[test]
    fn test_config_path_file_name() {
        if std::env::var("VOXTEST_CONFIG").is_err() {
            let path = config_path().unwrap();
            assert_eq!(path.file_name().unwrap(), "config.toml");
        }
    }
}
