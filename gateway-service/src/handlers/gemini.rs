use super::generate_recorded;
use crate::dtos::{GeminiTestRequest, GeminiTestResponse};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Forward `prompt` verbatim and relay the completion. The body is optional.
pub async fn gemini_test(State(state): State<AppState>, body: Bytes) -> Response {
    let prompt = match GeminiTestRequest::from_body(&body) {
        Ok(request) => request.prompt_or_default(),
        Err(e) => return e.into_response(),
    };

    match generate_recorded(state.text_provider.as_ref(), "gemini_test", &prompt).await {
        Ok(response) => Json(GeminiTestResponse {
            status: "success".to_string(),
            message: "Gemini API is working!".to_string(),
            prompt,
            response: response.text,
        })
        .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "error": "Gemini API test failed",
                "message": e.to_string(),
            })),
        )
            .into_response(),
    }
}
