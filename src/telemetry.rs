//! Diagnostic logging
//!
//! Installs a compact `tracing` subscriber on stderr so diagnostics never mix
//! with command output. `RUST_LOG` wins over the configured level.

use tracing_subscriber::EnvFilter;

use crate::error::{ResilienceError, ResilienceResult};

/// Build the filter, preferring `RUST_LOG` over the configured level
pub fn env_filter(default_level: &str) -> ResilienceResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(default_level).map_err(|e| {
            ResilienceError::Config(format!(
                "invalid log level/filter '{}': {}",
                default_level, e
            ))
        }),
    }
}

/// Install the global subscriber
pub fn init(default_level: &str) -> ResilienceResult<()> {
    let filter = env_filter(default_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| ResilienceError::Config(format!("telemetry error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let err = env_filter("warn,[[[").unwrap_err();
        assert!(matches!(err, ResilienceError::Config(_)));
    }

    #[test]
    fn test_valid_level_builds() {
        assert!(env_filter("debug").is_ok());
    }
}
