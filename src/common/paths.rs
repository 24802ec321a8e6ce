//! Configuration paths
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/rpc-smoke/`
//! - macOS: `~/Library/Application Support/rpc-smoke/`
//! - Windows: `%APPDATA%\rpc-smoke\`

use std::path::PathBuf;

/// Name used for the configuration directory
const APP_NAME: &str = "rpc-smoke";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_is_toml_in_config_dir() {
        if let (Some(dir), Some(path)) = (config_dir(), config_path()) {
            assert_eq!(path.parent(), Some(dir.as_path()));
            assert_eq!(path.file_name().unwrap(), "config.toml");
        }
    }
}
