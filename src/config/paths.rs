//! Path management for the resilience tracker
//!
//! Provides XDG-compliant path resolution for the configuration file.
//! Session data itself is never written here.
//!
//! ## Path Resolution Order
//!
//! 1. `RESILIENCE_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/resilience-cli` or `~/.config/resilience-cli`
//! 3. Windows: `%APPDATA%\resilience-cli`

use std::path::PathBuf;

use crate::error::ResilienceError;

/// Manages all paths used by the resilience tracker
#[derive(Debug, Clone)]
pub struct ResiliencePaths {
    base_dir: PathBuf,
}

impl ResiliencePaths {
    /// Create a new ResiliencePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ResilienceError> {
        let base_dir = if let Ok(custom) = std::env::var("RESILIENCE_CLI_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ResiliencePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/resilience-cli/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ResilienceError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            ResilienceError::Io(format!("Failed to create base directory: {}", e))
        })
    }
}

/// Resolve the default base directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, ResilienceError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                ResilienceError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("resilience-cli"))
}

/// Resolve the default base directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, ResilienceError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| ResilienceError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("resilience-cli"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ResiliencePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var("RESILIENCE_CLI_DATA_DIR", custom_path);

        let paths = ResiliencePaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var("RESILIENCE_CLI_DATA_DIR");
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ResiliencePaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
    }
}
