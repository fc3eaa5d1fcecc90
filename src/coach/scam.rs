//! Scam-message classification
//!
//! The backend is asked for a JSON object with exactly three fields. Anything
//! else that comes back is a malformed response, never a guess.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ResilienceError, ResilienceResult};

use super::backend::{GenerationRequest, GenerativeBackend};

/// Shown to the user whenever classification fails
pub const SCAN_FAILURE_MESSAGE: &str = "Failed to analyze the message. Please try again.";

/// Verdict on a single message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScamAnalysis {
    pub is_scam: bool,

    /// Confidence in the verdict, 0-100
    pub confidence: f64,

    /// Plain-language reasoning, naming any red flags
    pub explanation: String,
}

impl ScamAnalysis {
    pub fn verdict(&self) -> &'static str {
        if self.is_scam {
            "Likely a scam"
        } else {
            "Looks safe"
        }
    }
}

/// The classification prompt for a message
pub fn build_scam_prompt(message: &str) -> String {
    format!(
        "You are a scam detection expert for South Africans. Analyze the following message and determine if it is a scam.\n\
         Message: \"{}\"\n\
         Respond ONLY with a valid JSON object with three keys:\n\
         1. \"is_scam\": a boolean (true if it's a scam, false otherwise).\n\
         2. \"confidence\": a number between 0 and 100 representing your confidence in the verdict.\n\
         3. \"explanation\": a short, simple explanation in plain language about why it is or isn't a scam. \
         Mention common red flags like requests for upfront fees, urgent language, or suspicious links.\n",
        message
    )
}

/// JSON schema the reply must follow
pub fn scam_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "is_scam": { "type": "BOOLEAN" },
            "confidence": { "type": "NUMBER" },
            "explanation": { "type": "STRING" }
        },
        "required": ["is_scam", "confidence", "explanation"]
    })
}

/// Parse and check a classification reply
pub fn parse_scam_analysis(text: &str) -> ResilienceResult<ScamAnalysis> {
    let analysis: ScamAnalysis = serde_json::from_str(text.trim())
        .map_err(|e| ResilienceError::MalformedResponse(format!("scam analysis: {}", e)))?;

    if !analysis.confidence.is_finite() || !(0.0..=100.0).contains(&analysis.confidence) {
        return Err(ResilienceError::MalformedResponse(format!(
            "scam analysis confidence out of range: {}",
            analysis.confidence
        )));
    }

    Ok(analysis)
}

/// Service that classifies free-text messages
pub struct ScamScanner<'a> {
    backend: &'a dyn GenerativeBackend,
}

impl<'a> ScamScanner<'a> {
    pub fn new(backend: &'a dyn GenerativeBackend) -> Self {
        Self { backend }
    }

    /// Classify a message; blank input is rejected without a backend call
    pub fn analyze(&self, message: &str) -> ResilienceResult<ScamAnalysis> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ResilienceError::Validation(
                "Message to analyze cannot be empty".into(),
            ));
        }

        let request =
            GenerationRequest::structured(build_scam_prompt(message), scam_response_schema());
        let reply = self.backend.generate(&request)?;
        let analysis = parse_scam_analysis(&reply)?;

        debug!(
            is_scam = analysis.is_scam,
            confidence = analysis.confidence,
            "message classified"
        );
        Ok(analysis)
    }
}
