//! Language catalog endpoint.

use axum::Json;
use serde_json::{json, Value};

use crate::languages::LANGUAGES;

/// GET /api/languages: the native languages a client can offer.
pub async fn list_languages() -> Json<Value> {
    let languages: Vec<Value> = LANGUAGES
        .iter()
        .map(|l| {
            json!({
                "code": l.code,
                "label": l.label,
                "name": l.display_name(),
                "flag": l.flag,
            })
        })
        .collect();
    Json(json!({ "languages": languages }))
}
