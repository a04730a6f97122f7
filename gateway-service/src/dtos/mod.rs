//! Request and response bodies for the HTTP surface.

use crate::prompts::{DEFAULT_LANGUAGE, DEFAULT_TEST_PROMPT};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CodeReviewRequest {
    #[validate(
        required(message = "Code is required"),
        length(min = 1, message = "Code is required")
    )]
    pub code: Option<String>,
    pub language: Option<String>,
}

impl CodeReviewRequest {
    pub fn language_or_default(&self) -> String {
        self.language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeReviewResponse {
    pub success: bool,
    pub review: String,
    pub language: String,
    /// RFC 3339 UTC with milliseconds, e.g. `2024-05-01T12:00:00.000Z`.
    pub timestamp: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeminiTestRequest {
    pub prompt: Option<String>,
}

impl GeminiTestRequest {
    /// Parse an optional JSON body. An empty body means "use the default".
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid JSON body: {}", e)))
    }

    pub fn prompt_or_default(self) -> String {
        self.prompt
            .unwrap_or_else(|| DEFAULT_TEST_PROMPT.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiTestResponse {
    pub status: String,
    pub message: String,
    pub prompt: String,
    pub response: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseTestResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_code_fails_validation() {
        let request: CodeReviewRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn empty_code_fails_validation() {
        let request: CodeReviewRequest = serde_json::from_str(r#"{"code":""}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn language_defaults_to_javascript() {
        let request: CodeReviewRequest = serde_json::from_str(r#"{"code":"x"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.language_or_default(), "javascript");
    }

    #[test]
    fn empty_gemini_body_uses_default_prompt() {
        let request = GeminiTestRequest::from_body(b"").unwrap();
        assert_eq!(request.prompt_or_default(), DEFAULT_TEST_PROMPT);

        let request = GeminiTestRequest::from_body(b"{}").unwrap();
        assert_eq!(request.prompt_or_default(), DEFAULT_TEST_PROMPT);
    }

    #[test]
    fn malformed_gemini_body_is_rejected() {
        assert!(GeminiTestRequest::from_body(b"{not json").is_err());
    }
}
