//! Structured-output LLM providers.
//!
//! The gateway talks to providers only through [`StructuredProvider`]: send a
//! system instruction, a user prompt and a JSON schema, get back a JSON
//! object. Each provider maps that onto its own structured-output mode.

pub mod gemini;
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::config::{ProviderBackend, ProviderConfig};
use crate::error::{BroError, Result};

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

/// One structured-generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    /// Fixed instruction text, never user-controlled.
    pub system: String,
    /// The only variable content.
    pub prompt: String,
    /// Schema name, required by some providers.
    pub schema_name: String,
    /// JSON Schema (draft 2020-12 subset) the output must satisfy.
    pub schema: Value,
}

/// Provider-side failure, classified for logging.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("rate limited or out of quota: {0}")]
    RateLimit(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(String),

    /// The provider answered but produced no usable output
    /// (safety block, refusal, empty candidate list).
    #[error("empty response: {0}")]
    EmptyResponse(String),

    /// The provider answered with text that is not a JSON object.
    #[error("malformed structured output: {0}")]
    MalformedOutput(String),
}

/// Classify a non-success HTTP status.
pub fn parse_provider_error(status: u16, message: &str) -> ProviderError {
    match status {
        401 | 403 => ProviderError::Auth(message.to_string()),
        429 => ProviderError::RateLimit(message.to_string()),
        _ => ProviderError::Api {
            status,
            message: message.to_string(),
        },
    }
}

/// Pull `error.message` out of a provider error body, falling back to the raw text.
pub(crate) fn error_body_message(provider: &str, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .map(|m| format!("{provider} API error: {m}"))
        .unwrap_or_else(|| format!("{provider} API error: {body}"))
}

/// Parse model output text into a JSON object.
pub(crate) fn parse_object(text: &str) -> std::result::Result<Value, ProviderError> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| ProviderError::MalformedOutput(format!("not valid JSON: {e}")))?;
    if !value.is_object() {
        return Err(ProviderError::MalformedOutput(
            "top-level value is not an object".into(),
        ));
    }
    Ok(value)
}

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| BroError::Provider(format!("failed to build HTTP client: {e}")))
}

/// A model endpoint that can produce schema-constrained JSON.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StructuredProvider: Send + Sync {
    /// Run one structured-generation call and return the parsed object.
    async fn generate_object(
        &self,
        request: StructuredRequest,
    ) -> std::result::Result<Value, ProviderError>;

    /// Short provider identifier for logs.
    fn name(&self) -> &str;

    /// Model the provider was configured with.
    fn model(&self) -> &str;
}

/// Build the configured provider.
///
/// Fails with [`BroError::Config`] when no API key can be resolved.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn StructuredProvider>> {
    let timeout = Duration::from_secs(config.timeout_secs.max(1));
    match config.backend {
        ProviderBackend::Gemini => {
            let provider = GeminiProvider::from_config(config, timeout)?.ok_or_else(|| {
                BroError::Config(
                    "no Gemini credentials: set providers.api_key, GEMINI_API_KEY or GOOGLE_API_KEY"
                        .into(),
                )
            })?;
            Ok(Arc::new(provider))
        }
        ProviderBackend::OpenAi => {
            let provider = OpenAiProvider::from_config(config, timeout)?.ok_or_else(|| {
                BroError::Config(
                    "no OpenAI credentials: set providers.api_key or OPENAI_API_KEY".into(),
                )
            })?;
            Ok(Arc::new(provider))
        }
    }
}
