mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::DateTime;
use common::TestApp;
use gateway_service::services::datastore::mock::MockDataStore;
use serde_json::json;
use tower::util::ServiceExt;

#[tokio::test]
async fn health_reports_ok_and_services() {
    let app = TestApp::healthy();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["services"]["supabase"], "connected");
    assert_eq!(body["services"]["gemini"], "connected");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn api_test_echoes_message() {
    let app = TestApp::healthy();

    let (status, body) = app.get("/api/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "API is working!" }));
}

#[tokio::test]
async fn responses_are_json_with_security_headers() {
    let app = TestApp::healthy();

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let headers = response.headers();
    assert!(headers["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn code_review_without_code_is_rejected_before_provider() {
    let app = TestApp::healthy();

    let (status, body) = app.post_json("/api/code-review", "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Code is required");
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn code_review_with_empty_code_is_rejected() {
    let app = TestApp::healthy();

    let (status, body) = app
        .post_json("/api/code-review", r#"{"code":"","language":"python"}"#)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn code_review_with_malformed_json_is_rejected() {
    let app = TestApp::healthy();

    let (status, body) = app.post_json("/api/code-review", "{\"code\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(app.provider.call_count(), 0);
}

#[tokio::test]
async fn code_review_forwards_prompt_and_returns_review() {
    let app = TestApp::healthy();

    let (status, body) = app
        .post_json(
            "/api/code-review",
            r#"{"code":"function f(){}","language":"javascript"}"#,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["language"], "javascript");

    let prompts = app.provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("function f(){}"));
    assert!(prompts[0].contains("javascript"));

    let review = body["review"].as_str().unwrap();
    assert!(!review.is_empty());
    assert_eq!(review, format!("Mock response for: {}", prompts[0]));

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn code_review_defaults_language_to_javascript() {
    let app = TestApp::healthy();

    let (status, body) = app
        .post_json("/api/code-review", r#"{"code":"print('hi')"}"#)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "javascript");
    assert!(app.provider.prompts()[0].contains("javascript"));
}

#[tokio::test]
async fn code_review_passes_language_through_verbatim() {
    let app = TestApp::healthy();

    let (status, body) = app
        .post_json("/api/code-review", r#"{"code":"fn main() {}","language":"rust"}"#)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "rust");
    assert!(app.provider.prompts()[0].contains("```rust"));
}

#[tokio::test]
async fn provider_failure_returns_500_and_service_keeps_running() {
    let app = TestApp::new(false, MockDataStore::new(vec![]));

    let (status, body) = app
        .post_json("/api/code-review", r#"{"code":"let x = 1;"}"#)
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to review code");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Mock text provider not enabled"));

    let (status, body) = app.post_json("/api/gemini-test", "{}").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], "error");
    assert!(body["message"].is_string());

    let (status, _) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn gemini_test_forwards_prompt_verbatim() {
    let app = TestApp::healthy();

    let (status, body) = app
        .post_json("/api/gemini-test", r#"{"prompt":"Say hi"}"#)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["prompt"], "Say hi");
    assert_eq!(body["response"], "Mock response for: Say hi");
    assert_eq!(app.provider.prompts(), vec!["Say hi".to_string()]);
}

#[tokio::test]
async fn gemini_test_uses_default_prompt_without_body() {
    let app = TestApp::healthy();

    let request = Request::builder()
        .method("POST")
        .uri("/api/gemini-test")
        .body(Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["prompt"],
        gateway_service::prompts::DEFAULT_TEST_PROMPT
    );
    assert_eq!(app.provider.call_count(), 1);
}

#[tokio::test]
async fn supabase_test_returns_rows_on_success() {
    let app = TestApp::new(
        true,
        MockDataStore::new(vec![json!({ "id": 1 }), json!({ "id": 2 })]),
    );

    let (status, body) = app.get("/api/supabase-test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "connected");
    assert_eq!(body["data"], json!([{ "id": 1 }]));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn supabase_test_reports_query_error_as_connected() {
    let app = TestApp::new(
        true,
        MockDataStore::failing("relation \"public.users\" does not exist"),
    );

    let (status, body) = app.get("/api/supabase-test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "connected");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("does not exist"));
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_text() {
    gateway_service::services::init_metrics();
    let app = TestApp::healthy();

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}
