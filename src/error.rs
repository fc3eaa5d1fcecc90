//! Error types for the resilience tracker
//!
//! The scoring core never fails. Every variant here comes from the input
//! boundary, configuration, snapshot files, or the generative-language
//! collaborators.

use thiserror::Error;

/// The main error type for resilience tracker operations
#[derive(Error, Debug)]
pub enum ResilienceError {
    /// Bad or unreadable settings, missing API key
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("YAML error: {0}")]
    Yaml(String),

    /// Validation errors at the input boundary
    #[error("Validation error: {0}")]
    Validation(String),

    /// The external generative service failed (network, non-2xx, empty reply)
    #[error("Service error: {0}")]
    Service(String),

    /// The external service replied, but not in the requested shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A snapshot could not be loaded
    #[error("Import error: {0}")]
    Import(String),

    /// A snapshot could not be written
    #[error("Export error: {0}")]
    Export(String),

    /// The user abandoned an interactive flow (e.g. end of input)
    #[error("Cancelled: {0}")]
    Cancelled(String),
}

impl ResilienceError {
    /// Rejected user input; state was left untouched
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from one of the external collaborators
    pub fn is_external(&self) -> bool {
        matches!(self, Self::Service(_) | Self::MalformedResponse(_))
    }
}

impl From<std::io::Error> for ResilienceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ResilienceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for ResilienceError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for ResilienceError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<reqwest::Error> for ResilienceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Service(err.to_string())
    }
}

/// Result type alias for resilience tracker operations
pub type ResilienceResult<T> = Result<T, ResilienceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResilienceError::Config("missing API key".into());
        assert_eq!(err.to_string(), "Configuration error: missing API key");

        let err = ResilienceError::Validation("Amount must be greater than zero".into());
        assert_eq!(
            err.to_string(),
            "Validation error: Amount must be greater than zero"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_external_classification() {
        assert!(ResilienceError::Service("timeout".into()).is_external());
        assert!(ResilienceError::MalformedResponse("no is_scam".into()).is_external());
        assert!(!ResilienceError::Validation("blank".into()).is_external());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err: ResilienceError = io_err.into();
        assert_eq!(err.to_string(), "I/O error: stdout closed");
        assert!(matches!(err, ResilienceError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ResilienceError = json_err.into();
        assert!(matches!(err, ResilienceError::Json(_)));
    }
}
