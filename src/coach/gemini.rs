//! Gemini `generateContent` client
//!
//! Blocking HTTP transport for [`GenerativeBackend`]. The API key travels in
//! the `x-goog-api-key` header so it never shows up in logged URLs.

use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GeminiSettings;
use crate::error::{ResilienceError, ResilienceResult};

use super::backend::{GenerationRequest, GenerativeBackend};

const API_KEY_HEADER: &str = "x-goog-api-key";
const ERROR_BODY_LIMIT: usize = 320;

/// HTTP client for the Gemini generative-language API
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    url: Url,
    model: String,
    api_key: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("url", &self.url.as_str())
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiClient {
    /// Create a client for an explicit endpoint, model and key
    pub fn new(endpoint: &str, model: &str, api_key: impl Into<String>) -> ResilienceResult<Self> {
        Ok(Self {
            http: Client::new(),
            url: resolve_endpoint(endpoint, model)?,
            model: model.to_string(),
            api_key: api_key.into(),
        })
    }

    /// Create a client from settings, reading the key from the environment
    pub fn from_settings(settings: &GeminiSettings) -> ResilienceResult<Self> {
        let api_key = settings.api_key()?;
        Self::new(&settings.endpoint, &settings.model, api_key)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl GenerativeBackend for GeminiClient {
    fn generate(&self, request: &GenerationRequest) -> ResilienceResult<String> {
        let body = GenerateContentRequest::from(request);
        debug!(
            model = %self.model,
            structured = request.is_structured(),
            "sending generateContent request"
        );

        let response = self
            .http
            .post(self.url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| ResilienceError::Service(format!("gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            warn!(%status, "gemini returned an error status");
            return Err(ResilienceError::Service(format!(
                "gemini error {}: {}",
                status,
                truncate(&text, ERROR_BODY_LIMIT)
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| ResilienceError::Service(format!("invalid gemini response: {}", e)))?;

        parsed.output_text().ok_or_else(|| {
            ResilienceError::Service("gemini response contained no text".to_string())
        })
    }
}

/// Build `{endpoint}/v1beta/models/{model}:generateContent`
///
/// An endpoint that already names `:generateContent` is used verbatim.
pub fn resolve_endpoint(endpoint: &str, model: &str) -> ResilienceResult<Url> {
    let full = if endpoint.contains(":generateContent") {
        endpoint.to_string()
    } else {
        format!(
            "{}/v1beta/models/{}:generateContent",
            endpoint.trim_end_matches('/'),
            model
        )
    };

    Url::parse(&full)
        .map_err(|e| ResilienceError::Config(format!("invalid gemini endpoint {}: {}", full, e)))
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl From<&GenerationRequest> for GenerateContentRequest {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: request.response_schema.as_ref().map(|schema| {
                GenerationConfig {
                    response_mime_type: "application/json".to_string(),
                    response_schema: schema.clone(),
                }
            }),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined; None when there is no text
    fn output_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_endpoint() {
        let url = resolve_endpoint("https://generativelanguage.googleapis.com/", "gemini-2.5-flash")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );

        let verbatim = resolve_endpoint(
            "http://localhost:8080/v1beta/models/m:generateContent",
            "ignored",
        )
        .unwrap();
        assert_eq!(
            verbatim.as_str(),
            "http://localhost:8080/v1beta/models/m:generateContent"
        );

        assert!(resolve_endpoint("not a url", "m").is_err());
    }

    #[test]
    fn test_text_request_body() {
        let body = GenerateContentRequest::from(&GenerationRequest::text("give tips"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, json!({"contents": [{"parts": [{"text": "give tips"}]}]}));
    }

    #[test]
    fn test_structured_request_body() {
        let schema = json!({"type": "OBJECT"});
        let body = GenerateContentRequest::from(&GenerationRequest::structured("scan", schema.clone()));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(json["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_output_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "* Save R10 a day\n"}, {"text": "* Sell airtime"}]}, "finishReason": "STOP"},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"totalTokenCount": 42}
        }))
        .unwrap();

        assert_eq!(
            response.output_text().as_deref(),
            Some("* Save R10 a day\n* Sell airtime")
        );
    }

    #[test]
    fn test_output_text_missing() {
        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.output_text(), None);

        let blocked: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(blocked.output_text(), None);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = GeminiClient::new("http://localhost:1", "m", "super-secret").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("super-secret"));
        assert_eq!(client.model(), "m");
    }

    #[test]
    fn test_unreachable_host_is_service_error() {
        let client = GeminiClient::new("http://127.0.0.1:9", "m", "key").unwrap();
        let err = client.generate(&GenerationRequest::text("hi")).unwrap_err();
        assert!(matches!(err, ResilienceError::Service(_)));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
