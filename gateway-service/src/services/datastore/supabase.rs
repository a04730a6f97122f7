//! Supabase client over the PostgREST interface (`/rest/v1`).

use super::{DataStore, DataStoreError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct SupabaseClientConfig {
    pub url: String,
    pub service_role_key: Secret<String>,
}

pub struct SupabaseClient {
    rest_url: String,
    client: Client,
}

/// PostgREST error body. Only `message` is relayed.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

fn sensitive_header(value: &str, name: &str) -> Result<HeaderValue, DataStoreError> {
    let mut header = HeaderValue::from_str(value).map_err(|_| {
        DataStoreError::NotConfigured(format!("{} is not a valid header value", name))
    })?;
    header.set_sensitive(true);
    Ok(header)
}

impl SupabaseClient {
    pub fn new(config: SupabaseClientConfig) -> Result<Self, DataStoreError> {
        let url = Url::parse(config.url.trim())
            .map_err(|e| DataStoreError::NotConfigured(format!("Invalid Supabase URL: {}", e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DataStoreError::NotConfigured(format!(
                "Supabase URL must use http or https, got {}",
                url.scheme()
            )));
        }

        let key = config.service_role_key.expose_secret();
        let mut headers = HeaderMap::new();
        headers.insert("apikey", sensitive_header(key, "Service role key")?);
        headers.insert(
            AUTHORIZATION,
            sensitive_header(&format!("Bearer {}", key), "Service role key")?,
        );

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                DataStoreError::NotConfigured(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            rest_url: format!("{}/rest/v1", url.as_str().trim_end_matches('/')),
            client,
        })
    }
}

#[async_trait]
impl DataStore for SupabaseClient {
    async fn probe(&self, table: &str, limit: u32) -> Result<serde_json::Value, DataStoreError> {
        let url = format!("{}/{}", self.rest_url, table);

        tracing::debug!(table = %table, limit, "Querying Supabase");

        let response = self
            .client
            .get(&url)
            .query(&[("select", "*".to_string()), ("limit", limit.to_string())])
            .send()
            .await
            .map_err(|e| DataStoreError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<PostgrestError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(DataStoreError::Query {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DataStoreError::InvalidResponse(e.to_string()))
    }
}
