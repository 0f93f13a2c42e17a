//! Health endpoint for the API.

use axum::Json;
use serde_json::{json, Value};

use crate::languages::LANGUAGES;

/// GET /api/health: liveness, crate version and how many languages are served.
pub async fn get_health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "languages": LANGUAGES.len(),
    }))
}
