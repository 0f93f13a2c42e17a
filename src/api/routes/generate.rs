//! `POST /api/generate`: explain one term.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::api::server::AppState;

/// Request body. Both fields are required; missing ones surface as 400.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateBody {
    pub term: Option<String>,
    pub language: Option<String>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            debug!("Rejected oversized generate body: {}", rejection);
            return error_response(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large");
        }
        Err(rejection) => {
            debug!("Rejected generate body: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, "Missing term or language");
        }
    };
    let term = body.term.unwrap_or_default();
    let language = body.language.unwrap_or_default();

    match state.gateway.generate(&term, &language).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) if e.is_client_error() => {
            error_response(StatusCode::BAD_REQUEST, "Missing term or language")
        }
        Err(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate response",
        ),
    }
}
