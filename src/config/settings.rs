//! User settings for the resilience tracker
//!
//! Manages display preferences, log verbosity and the generative-language
//! backend configuration.

use serde::{Deserialize, Serialize};

use super::paths::ResiliencePaths;
use crate::error::ResilienceError;

/// Fallback variable consulted when the configured key variable is unset
pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// Generative-language backend settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiSettings {
    /// Model name used for both advice and scam classification
    #[serde(default = "default_model")]
    pub model: String,

    /// Base endpoint; `/v1beta/models/{model}:generateContent` is appended
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl GeminiSettings {
    /// Read the API key from the configured variable, then `API_KEY`
    pub fn api_key(&self) -> Result<String, ResilienceError> {
        std::env::var(&self.api_key_env)
            .or_else(|_| std::env::var(FALLBACK_API_KEY_ENV))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ResilienceError::Config(format!(
                    "missing API key: set {} (or {})",
                    self.api_key_env, FALLBACK_API_KEY_ENV
                ))
            })
    }
}

/// User settings for the resilience tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default tracing filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Generative-language backend
    #[serde(default)]
    pub gemini: GeminiSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            log_level: default_log_level(),
            gemini: GeminiSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_default(paths: &ResiliencePaths) -> Result<Self, ResilienceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ResilienceError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ResilienceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ResiliencePaths) -> Result<(), ResilienceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ResilienceError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            ResilienceError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
