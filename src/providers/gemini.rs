//! Native Gemini provider using `responseSchema` structured output.
//!
//! Auth priority: config key → GEMINI_API_KEY → GOOGLE_API_KEY → GEMINI_ACCESS_TOKEN
//!
//! Thinking model support: Gemini 2.5 models return parts tagged `thought: true`.
//! Those are skipped; only the final answer text is parsed as JSON.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::Result;

use super::{
    build_client, error_body_message, parse_object, parse_provider_error, ProviderError,
    StructuredProvider, StructuredRequest,
};

/// Gemini v1beta REST API base.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

// ── Auth ─────────────────────────────────────────────────────────────────────

/// Authentication method for the Gemini REST API.
pub enum GeminiAuth {
    /// Standard API key, sent as `?key=` query parameter.
    ApiKey(String),
    /// OAuth access token (e.g. `gcloud auth print-access-token`), sent as
    /// `Authorization: Bearer` header.
    BearerToken(String),
}

impl std::fmt::Debug for GeminiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("GeminiAuth::ApiKey([REDACTED])"),
            Self::BearerToken(_) => f.write_str("GeminiAuth::BearerToken([REDACTED])"),
        }
    }
}

impl GeminiAuth {
    /// Resolve credentials in priority order: explicit key, env key, access token.
    pub fn resolve(
        explicit_key: Option<&str>,
        env_key: Option<&str>,
        access_token: Option<&str>,
    ) -> Option<Self> {
        let non_empty = |v: Option<&str>| v.filter(|k| !k.trim().is_empty()).map(String::from);
        non_empty(explicit_key)
            .or_else(|| non_empty(env_key))
            .map(Self::ApiKey)
            .or_else(|| non_empty(access_token).map(Self::BearerToken))
    }
}

// ── Schema conversion ────────────────────────────────────────────────────────

/// Convert a JSON Schema subset into Gemini's OpenAPI-style schema.
///
/// Type names become upper-case and keywords Gemini rejects
/// (`additionalProperties`, `$schema`, `title`) are dropped.
pub fn to_gemini_schema(schema: &Value) -> Value {
    let Some(obj) = schema.as_object() else {
        return schema.clone();
    };
    let mut out = Map::new();
    for (key, value) in obj {
        match key.as_str() {
            "type" => {
                let ty = value.as_str().unwrap_or("string").to_ascii_uppercase();
                out.insert("type".into(), Value::String(ty));
            }
            "properties" => {
                let props = value
                    .as_object()
                    .map(|p| {
                        p.iter()
                            .map(|(name, s)| (name.clone(), to_gemini_schema(s)))
                            .collect::<Map<_, _>>()
                    })
                    .unwrap_or_default();
                out.insert("properties".into(), Value::Object(props));
                // Generated fields follow the `required` order.
                if let Some(required) = obj.get("required").filter(|r| r.is_array()) {
                    out.insert("propertyOrdering".into(), required.clone());
                }
            }
            "items" => {
                out.insert("items".into(), to_gemini_schema(value));
            }
            "minItems" | "maxItems" => {
                // Gemini expects int64 values encoded as strings.
                let n = value.as_u64().map(|n| n.to_string()).unwrap_or_default();
                out.insert(key.clone(), Value::String(n));
            }
            "required" | "description" | "enum" | "nullable" => {
                out.insert(key.clone(), value.clone());
            }
            _ => {}
        }
    }
    Value::Object(out)
}

// ── Provider ──────────────────────────────────────────────────────────────────

/// Gemini provider speaking the `generateContent` REST API directly.
pub struct GeminiProvider {
    auth: GeminiAuth,
    model: String,
    api_base: String,
    client: Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("auth", &self.auth)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GeminiProvider {
    /// Build a provider that authenticates with an API key.
    pub fn new_with_key(api_key: &str, model: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            auth: GeminiAuth::ApiKey(api_key.to_string()),
            model: model.to_string(),
            api_base: GEMINI_API_BASE.to_string(),
            client: build_client(timeout)?,
        })
    }

    /// Build from config, resolving credentials from config and environment.
    ///
    /// Returns `Ok(None)` when no credentials are available.
    pub fn from_config(config: &ProviderConfig, timeout: Duration) -> Result<Option<Self>> {
        let env_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok();
        let access_token = std::env::var("GEMINI_ACCESS_TOKEN").ok();

        let Some(auth) = GeminiAuth::resolve(
            config.api_key.as_deref(),
            env_key.as_deref(),
            access_token.as_deref(),
        ) else {
            return Ok(None);
        };

        Ok(Some(Self {
            auth,
            model: config.resolved_model().to_string(),
            api_base: config
                .api_base
                .clone()
                .unwrap_or_else(|| GEMINI_API_BASE.to_string()),
            client: build_client(timeout)?,
        }))
    }

    /// Build the `generateContent` request body for a structured call.
    pub fn build_request_body(&self, request: &StructuredRequest) -> Value {
        json!({
            "systemInstruction": { "parts": [{ "text": request.system }] },
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": {
                "temperature": 0.7,
                "responseMimeType": "application/json",
                "responseSchema": to_gemini_schema(&request.schema)
            }
        })
    }

    /// Extract final answer text from a Gemini API response.
    ///
    /// Parts tagged `"thought": true` are intermediate reasoning and are
    /// skipped. Returns `None` when no answer text exists.
    pub fn extract_text(response: &Value) -> Option<String> {
        let parts = response["candidates"][0]["content"]["parts"].as_array()?;

        let final_parts: Vec<&str> = parts
            .iter()
            .filter(|p| !p["thought"].as_bool().unwrap_or(false))
            .filter_map(|p| p["text"].as_str())
            .collect();

        if final_parts.is_empty() {
            None
        } else {
            Some(final_parts.join(""))
        }
    }

    /// Why a response carried no text, for the error message.
    fn empty_reason(response: &Value) -> String {
        if let Some(reason) = response["promptFeedback"]["blockReason"].as_str() {
            return format!("prompt blocked ({reason})");
        }
        match response["candidates"][0]["finishReason"].as_str() {
            Some(reason) => format!("no answer text (finishReason {reason})"),
            None => "no candidates in response".to_string(),
        }
    }

    /// Build the full API URL for `generateContent`.
    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    /// Attach authentication to the request builder.
    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            GeminiAuth::ApiKey(key) => request.query(&[("key", key.as_str())]),
            GeminiAuth::BearerToken(token) => request.bearer_auth(token),
        }
    }
}

#[async_trait]
impl StructuredProvider for GeminiProvider {
    async fn generate_object(
        &self,
        request: StructuredRequest,
    ) -> std::result::Result<Value, ProviderError> {
        let body = self.build_request_body(&request);

        debug!(model = %self.model, schema = %request.schema_name, "Gemini structured request");

        let response = self
            .apply_auth(self.client.post(self.api_url()).json(&body))
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = error_body_message("Gemini", &error_text);
            return Err(parse_provider_error(status.as_u16(), &message));
        }

        let json: Value = response.json().await.map_err(|e| {
            ProviderError::Transport(format!("Failed to read Gemini response: {e}"))
        })?;

        let text = Self::extract_text(&json)
            .ok_or_else(|| ProviderError::EmptyResponse(Self::empty_reason(&json)))?;
        parse_object(&text)
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
