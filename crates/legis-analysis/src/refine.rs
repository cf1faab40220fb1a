//! LLM-backed extraction.
//!
//! Sends the cleaned text to the Messages API with a prompt asking for the
//! same section map and rule list as strict JSON. The reply is parsed as JSON
//! and otherwise passed through untouched; it is never merged with the
//! deterministic result.
use legis_common::anthropic::{AnthropicClient, Message, MessagesRequest};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RefineError;

pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

pub const REFINE_PROMPT: &str = r#"
You are a legal analysis AI. Based on the provided legislation text, return STRICT JSON:

{
 "task3": {
   "definitions": "...",
   "obligations": "...",
   "responsibilities": "...",
   "eligibility": "...",
   "payments": "...",
   "penalties": "...",
   "record_keeping": "..."
 },
 "task4": [
   {"rule": "...", "status": "...", "evidence": "...", "confidence": 0-100}
 ]
}

No explanation. JSON only.
"#;

#[derive(Clone)]
pub struct RefineSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

impl Default for RefineSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl std::fmt::Debug for RefineSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefineSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl RefineSettings {
    /// Optional:
    /// - `ANTHROPIC_API_KEY` (checked when a refinement runs, not here)
    /// - `ANTHROPIC_MODEL` (default: "claude-3-5-sonnet-latest")
    /// - `ANTHROPIC_MAX_TOKENS` (default: 2000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            model: std::env::var("ANTHROPIC_MODEL").unwrap_or(defaults.model),
            max_tokens: std::env::var("ANTHROPIC_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse::<u32>().ok())
                .unwrap_or(defaults.max_tokens),
        }
    }
}

/// Raw JSON returned by the model, expected to carry `task3` and `task4`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RefinedAnalysis(pub serde_json::Value);

impl RefinedAnalysis {
    pub fn task3(&self) -> Option<&serde_json::Value> {
        self.0.get("task3")
    }

    pub fn task4(&self) -> Option<&serde_json::Value> {
        self.0.get("task4")
    }
}

pub struct Refiner {
    client: AnthropicClient,
    settings: RefineSettings,
}

impl Refiner {
    pub fn new(client: AnthropicClient, settings: RefineSettings) -> Self {
        Self { client, settings }
    }

    pub async fn refine(&self, cleaned: &str) -> Result<RefinedAnalysis, RefineError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(RefineError::MissingApiKey)?;

        let request = build_request(&self.settings, cleaned);
        info!(
            model = %request.model,
            max_tokens = request.max_tokens,
            text_chars = cleaned.chars().count(),
            "requesting llm refinement"
        );
        let response = self.client.create_message(api_key, &request).await?;
        if let Some(usage) = &response.usage {
            info!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "llm refinement complete"
            );
        }

        let text = response.first_text().ok_or(RefineError::EmptyResponse)?;
        parse_refined(text)
    }
}

fn build_request(settings: &RefineSettings, cleaned: &str) -> MessagesRequest {
    MessagesRequest {
        model: settings.model.clone(),
        max_tokens: settings.max_tokens,
        messages: vec![Message::user(format!("{REFINE_PROMPT}\n\nTEXT:\n{cleaned}"))],
        temperature: Some(0.0),
    }
}

fn parse_refined(text: &str) -> Result<RefinedAnalysis, RefineError> {
    Ok(RefinedAnalysis(serde_json::from_str(text)?))
}

#[cfg(test)]
mod tests {
    use legis_common::anthropic::AnthropicClientConfig;

    use super::*;

    fn unreachable_client() -> AnthropicClient {
        // Port 9 on loopback: any attempted request would fail with a connect error.
        AnthropicClient::new(AnthropicClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..AnthropicClientConfig::default()
        })
        .expect("client")
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let refiner = Refiner::new(unreachable_client(), RefineSettings::default());
        let err = refiner.refine("Section 1").await.expect_err("should fail");
        assert!(matches!(err, RefineError::MissingApiKey));
        assert_eq!(err.to_string(), "ERROR: ANTHROPIC_API_KEY is not set.");
    }

    #[tokio::test]
    async fn blank_key_counts_as_missing() {
        let settings = RefineSettings {
            api_key: Some("   ".to_string()),
            ..RefineSettings::default()
        };
        let refiner = Refiner::new(unreachable_client(), settings);
        let err = refiner.refine("Section 1").await.expect_err("should fail");
        assert!(matches!(err, RefineError::MissingApiKey));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let settings = RefineSettings {
            api_key: Some("test-key".to_string()),
            ..RefineSettings::default()
        };
        let refiner = Refiner::new(unreachable_client(), settings);
        let err = refiner.refine("Section 1").await.expect_err("should fail");
        assert!(matches!(err, RefineError::Client(_)), "got {err}");
    }

    #[test]
    fn request_is_deterministic_and_carries_text() {
        let request = build_request(&RefineSettings::default(), "Section 1 body");
        assert_eq!(request.model, "claude-3-5-sonnet-latest");
        assert_eq!(request.max_tokens, 2000);
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(request.messages.len(), 1);
        let content = &request.messages[0].content;
        assert!(content.starts_with(REFINE_PROMPT));
        assert!(content.ends_with("\n\nTEXT:\nSection 1 body"));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let settings = RefineSettings {
            api_key: Some("sk-ant-secret".to_string()),
            ..RefineSettings::default()
        };
        let shown = format!("{settings:?}");
        assert!(!shown.contains("sk-ant-secret"));
        assert!(shown.contains("<redacted>"));
    }

    #[test]
    fn parses_strict_json() {
        let refined = parse_refined(r#"{"task3":{"definitions":"x"},"task4":[]}"#).expect("parse");
        assert_eq!(refined.task3().and_then(|v| v["definitions"].as_str()), Some("x"));
        assert_eq!(refined.task4().and_then(|v| v.as_array()).map(Vec::len), Some(0));
    }

    #[test]
    fn shape_is_not_validated() {
        let refined = parse_refined(r#"{"unexpected": true}"#).expect("parse");
        assert!(refined.task3().is_none());
        assert!(refined.task4().is_none());
    }

    #[test]
    fn non_json_reply_is_an_error() {
        let err = parse_refined("Here is the JSON you asked for: {}").expect_err("should fail");
        assert!(matches!(err, RefineError::InvalidJson(_)));
    }
}
