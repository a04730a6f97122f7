use super::generate_recorded;
use crate::dtos::{CodeReviewRequest, CodeReviewResponse};
use crate::prompts::code_review_prompt;
use crate::startup::AppState;
use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use service_core::error::AppError;
use service_core::extract::ApiJson;
use validator::Validate;

/// Review a code snippet. The provider output is returned as-is.
pub async fn code_review(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CodeReviewRequest>,
) -> Result<Json<CodeReviewResponse>, AppError> {
    payload.validate()?;

    let language = payload.language_or_default();
    let code = payload.code.unwrap_or_default();
    let prompt = code_review_prompt(&language, &code);

    let response = generate_recorded(state.text_provider.as_ref(), "code_review", &prompt)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                language = %language,
                code_len = code.len(),
                "Code review failed"
            );
            AppError::Upstream {
                error: "Failed to review code".to_string(),
                message: e.to_string(),
            }
        })?;

    Ok(Json(CodeReviewResponse {
        success: true,
        review: response.text,
        language,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
