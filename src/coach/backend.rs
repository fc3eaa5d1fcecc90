//! Generative-language transport abstraction
//!
//! Advice and scam classification only need "prompt in, text out", optionally
//! constrained to a JSON schema. Keeping that behind a trait lets the session
//! run against the real HTTP client or a scripted stand-in.

use serde_json::Value;

use crate::error::ResilienceResult;

/// A single generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Full prompt text
    pub prompt: String,

    /// When set, the reply must be JSON matching this schema
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    /// Free-form text request
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: None,
        }
    }

    /// Structured request constrained to a JSON schema
    pub fn structured(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            response_schema: Some(schema),
        }
    }

    pub fn is_structured(&self) -> bool {
        self.response_schema.is_some()
    }
}

/// Something that can turn a prompt into generated text
///
/// One round trip per call: implementations do not retry.
pub trait GenerativeBackend {
    fn generate(&self, request: &GenerationRequest) -> ResilienceResult<String>;
}
