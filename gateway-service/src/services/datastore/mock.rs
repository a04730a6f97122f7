//! In-memory data store for tests and offline runs.

use super::{DataStore, DataStoreError};
use async_trait::async_trait;
use serde_json::Value;

/// Returns fixed rows, or a fixed query error when built with
/// [`MockDataStore::failing`].
pub struct MockDataStore {
    rows: Vec<Value>,
    failure: Option<String>,
}

impl MockDataStore {
    pub fn new(rows: Vec<Value>) -> Self {
        Self {
            rows,
            failure: None,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl DataStore for MockDataStore {
    async fn probe(&self, _table: &str, limit: u32) -> Result<Value, DataStoreError> {
        if let Some(message) = &self.failure {
            return Err(DataStoreError::Query {
                status: 404,
                message: message.clone(),
            });
        }

        Ok(Value::Array(
            self.rows.iter().take(limit as usize).cloned().collect(),
        ))
    }
}
