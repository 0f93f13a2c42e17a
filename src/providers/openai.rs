//! OpenAI-compatible chat completions provider using `json_schema` response format.
//!
//! Works against api.openai.com and any server that implements the same
//! `/chat/completions` structured-output contract (set `providers.api_base`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::Result;

use super::{
    build_client, error_body_message, parse_object, parse_provider_error, ProviderError,
    StructuredProvider, StructuredRequest,
};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Structured-output provider for the OpenAI chat completions API.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    api_base: String,
    client: Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            api_base: OPENAI_API_BASE.to_string(),
            client: build_client(timeout)?,
        })
    }

    /// Build from config. The key comes from `providers.api_key`, then
    /// `OPENAI_API_KEY`. Returns `Ok(None)` when neither is set.
    pub fn from_config(config: &ProviderConfig, timeout: Duration) -> Result<Option<Self>> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty());
        let Some(api_key) = api_key else {
            return Ok(None);
        };

        let mut provider = Self::new(&api_key, config.resolved_model(), timeout)?;
        if let Some(base) = &config.api_base {
            provider.api_base = base.clone();
        }
        Ok(Some(provider))
    }

    /// Build the `/chat/completions` request body for a structured call.
    pub fn build_request_body(&self, request: &StructuredRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt }
            ],
            "temperature": 0.7,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": request.schema_name,
                    "strict": true,
                    "schema": request.schema
                }
            }
        })
    }

    /// Pull the JSON text out of a completion, or explain why there is none.
    pub fn extract_content(response: &Value) -> std::result::Result<String, ProviderError> {
        let message = &response["choices"][0]["message"];
        if let Some(refusal) = message["refusal"].as_str() {
            return Err(ProviderError::EmptyResponse(format!(
                "model refused: {refusal}"
            )));
        }
        match message["content"].as_str() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(ProviderError::EmptyResponse(format!(
                "no message content (finish_reason {})",
                response["choices"][0]["finish_reason"]
                    .as_str()
                    .unwrap_or("unknown")
            ))),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl StructuredProvider for OpenAiProvider {
    async fn generate_object(
        &self,
        request: StructuredRequest,
    ) -> std::result::Result<Value, ProviderError> {
        let body = self.build_request_body(&request);

        debug!(model = %self.model, schema = %request.schema_name, "OpenAI structured request");

        let response = self
            .client
            .post(self.api_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = error_body_message("OpenAI", &error_text);
            return Err(parse_provider_error(status.as_u16(), &message));
        }

        let json: Value = response.json().await.map_err(|e| {
            ProviderError::Transport(format!("Failed to read OpenAI response: {e}"))
        })?;

        let content = Self::extract_content(&json)?;
        parse_object(&content)
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> OpenAiProvider {
        OpenAiProvider::new("sk-test", "gpt-4o-mini", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_build_request_body_uses_json_schema_format() {
        let request = StructuredRequest {
            system: "Be a teacher".into(),
            prompt: "Concept: \"fotosyntese\"".into(),
            schema_name: "explanation".into(),
            schema: json!({ "type": "object" }),
        };
        let body = provider().build_request_body(&request);
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "Be a teacher");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "explanation");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
        assert_eq!(
            body["response_format"]["json_schema"]["schema"]["type"],
            "object"
        );
    }

    #[test]
    fn test_extract_content_returns_message_text() {
        let response = json!({
            "choices": [{ "message": { "role": "assistant", "content": "{\"a\":1}" } }]
        });
        assert_eq!(
            OpenAiProvider::extract_content(&response).unwrap(),
            "{\"a\":1}"
        );
    }

    #[test]
    fn test_extract_content_reports_refusal() {
        let response = json!({
            "choices": [{ "message": { "content": null, "refusal": "I can't help" } }]
        });
        let err = OpenAiProvider::extract_content(&response).unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse(m) if m.contains("I can't help")));
    }

    #[test]
    fn test_extract_content_empty_includes_finish_reason() {
        let response = json!({
            "choices": [{ "message": { "content": "" }, "finish_reason": "length" }]
        });
        let err = OpenAiProvider::extract_content(&response).unwrap_err();
        assert!(err.to_string().contains("length"));
    }

    #[test]
    fn test_api_url_respects_custom_base() {
        let mut p = provider();
        assert_eq!(p.api_url(), "https://api.openai.com/v1/chat/completions");
        p.api_base = "http://localhost:8000/v1/".into();
        assert_eq!(p.api_url(), "http://localhost:8000/v1/chat/completions");
    }

    #[test]
    fn test_debug_redacts_key() {
        let dbg = format!("{:?}", provider());
        assert!(!dbg.contains("sk-test"));
    }
}
