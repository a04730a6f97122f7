use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id for the current request, stored in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Reuses the caller's `x-request-id` or mints a UUIDv4, then echoes it on
/// the response. Ids that are not valid header values are replaced.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let (request_id, header_value) = match req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.is_empty())
    {
        Some(existing) => {
            let value = HeaderValue::from_str(existing).ok();
            (existing.to_string(), value)
        }
        None => {
            let fresh = Uuid::new_v4().to_string();
            let value = HeaderValue::from_str(&fresh).ok();
            (fresh, value)
        }
    };

    if let Some(value) = header_value.clone() {
        req.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    req.extensions_mut().insert(RequestId(request_id));

    let mut response = next.run(req).await;

    if let Some(value) = header_value {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
