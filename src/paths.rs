/// Platform-specific location of the config file
///
/// Follows the XDG Base Directory specification on Linux and the native
/// conventions on macOS and Windows.
use std::path::PathBuf;

/// Directory name used under the platform config dir
pub const PROJECT_DIR_NAME: &str = "ast-chunker";

/// Platform-agnostic path utilities
pub struct PlatformPaths;

impl PlatformPaths {
    /// Get the appropriate config directory for the current platform
    ///
    /// - Windows: %APPDATA%
    /// - macOS: ~/Library/Application Support
    /// - Linux/Unix: $XDG_CONFIG_HOME or ~/.config
    pub fn config_dir() -> PathBuf {
        Self::config_dir_from(|key| std::env::var(key).ok())
    }

    fn config_dir_from(var: impl Fn(&str) -> Option<String>) -> PathBuf {
        if cfg!(target_os = "windows") {
            var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
        } else if cfg!(target_os = "macos") {
            var("HOME")
                .map(|home| PathBuf::from(home).join("Library/Application Support"))
                .unwrap_or_else(|| PathBuf::from("."))
        } else {
            var("XDG_CONFIG_HOME")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .or_else(|| var("HOME").map(|home| PathBuf::from(home).join(".config")))
                .unwrap_or_else(|| PathBuf::from("."))
        }
    }

    /// Returns: {config_dir}/ast-chunker
    pub fn project_config_dir() -> PathBuf {
        Self::config_dir().join(PROJECT_DIR_NAME)
    }

    /// Returns: {config_dir}/ast-chunker/config.toml
    pub fn default_config_path() -> PathBuf {
        Self::project_config_dir().join("config.toml")
    }
}
