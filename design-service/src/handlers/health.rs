use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Liveness message for the editor frontend. Independent of configuration.
pub async fn index() -> impl IntoResponse {
    Json(json!({ "message": "OpenExpress server is running!" }))
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "design-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
