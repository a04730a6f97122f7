//! Request extractors that report failures as [`AppError`] JSON bodies.

use crate::error::AppError;
use axum::extract::FromRequest;

/// `axum::Json` whose rejections (missing content type, malformed JSON,
/// wrong field types) become `400` [`AppError::BadRequest`] responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
