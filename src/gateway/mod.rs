//! Generation gateway: turns `(term, native language)` into a validated
//! [`GenerationResult`] via a structured-output provider.
//!
//! The gateway is stateless. It makes exactly one provider call per request,
//! never retries, and collapses every upstream failure into an opaque
//! [`GenerationError::GenerationFailed`] after logging the detail.

pub mod prompt;
pub mod schema;

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::error::GenerationError;
use crate::explanation::{GenerationRequest, GenerationResult};
use crate::providers::{ProviderError, StructuredProvider, StructuredRequest};

pub use prompt::SYSTEM_INSTRUCTION;

#[derive(Clone)]
pub struct Gateway {
    provider: Arc<dyn StructuredProvider>,
}

impl Gateway {
    pub fn new(provider: Arc<dyn StructuredProvider>) -> Self {
        Self { provider }
    }

    /// Build the provider call for a validated request.
    pub fn structured_request(request: &GenerationRequest) -> StructuredRequest {
        StructuredRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt: prompt::user_prompt(request),
            schema_name: schema::SCHEMA_NAME.to_string(),
            schema: schema::result_schema(),
        }
    }

    /// Explain `term` for a reader whose native language is `native_language`.
    ///
    /// Blank input fails with `InvalidRequest` before any provider call.
    pub async fn generate(
        &self,
        term: &str,
        native_language: &str,
    ) -> Result<GenerationResult, GenerationError> {
        let request = GenerationRequest::new(term, native_language)?;
        debug!(term = %request.term(), language = %request.native_language(), "Generating explanation");

        let value = self
            .provider
            .generate_object(Self::structured_request(&request))
            .await
            .map_err(|e| match e {
                ProviderError::MalformedOutput(detail) => {
                    warn!(term = %request.term(), "Provider returned malformed output: {}", detail);
                    GenerationError::SchemaViolation(detail)
                }
                other => {
                    error!(term = %request.term(), "Generation failed: {}", other);
                    GenerationError::GenerationFailed
                }
            })?;

        schema::parse_result(&value).inspect_err(|e| {
            warn!(term = %request.term(), "Provider output rejected: {}", e);
        })
    }
}
