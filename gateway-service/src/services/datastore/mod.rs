//! Backing data store abstraction.
//!
//! Only a bounded read is needed: `/api/supabase-test` uses it to show the
//! project is reachable with the configured credential.

pub mod mock;
pub mod supabase;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataStoreError {
    #[error("Data store not configured: {0}")]
    NotConfigured(String),

    #[error("Query failed ({status}): {message}")]
    Query { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait DataStore: Send + Sync {
    /// Read at most `limit` rows from `table` and return them as JSON.
    async fn probe(&self, table: &str, limit: u32) -> Result<serde_json::Value, DataStoreError>;
}
