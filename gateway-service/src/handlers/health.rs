use crate::services::get_metrics;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness only. Both upstreams are reported as connected because their
/// handles were built at startup; nothing is probed here.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "message": "Code review gateway is running",
        "services": {
            "supabase": "connected",
            "gemini": "connected"
        }
    }))
}

pub async fn api_test() -> impl IntoResponse {
    Json(json!({ "message": "API is working!" }))
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}
