#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use gateway_service::services::datastore::mock::MockDataStore;
use gateway_service::services::providers::mock::MockTextProvider;
use gateway_service::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_PROBE_TABLE: &str = "users";

/// Router wired to mock upstreams, with handles kept for assertions.
pub struct TestApp {
    pub router: Router,
    pub provider: Arc<MockTextProvider>,
}

impl TestApp {
    pub fn new(provider_enabled: bool, data_store: MockDataStore) -> Self {
        let provider = Arc::new(MockTextProvider::new(provider_enabled));
        let state = AppState {
            text_provider: provider.clone(),
            data_store: Arc::new(data_store),
            probe_table: TEST_PROBE_TABLE.to_string(),
        };

        Self {
            router: build_router(state),
            provider,
        }
    }

    pub fn healthy() -> Self {
        Self::new(true, MockDataStore::new(vec![]))
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}
