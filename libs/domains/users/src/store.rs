use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::models::{Record, USER_KEY_ATTRIBUTE};

/// Opaque failure of a store call.
///
/// Transport, serialization and backend-side errors all collapse into this
/// one type; the message is kept for logs only.
#[derive(Debug, Error)]
#[error("record store failure: {0}")]
pub struct StoreError(String);

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value table holding one record per key.
///
/// Implementations can use different backends (DynamoDB, in-memory, ...).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Record stored under `key`, or `None` if there is none
    async fn get(&self, key: &str) -> StoreResult<Option<Record>>;

    /// Every record in the table
    async fn scan_all(&self) -> StoreResult<Vec<Record>>;

    /// Insert or wholesale replace the record under its key attribute
    async fn put(&self, record: Record) -> StoreResult<()>;

    /// Remove the record under `key`; absent keys are not an error
    async fn delete(&self, key: &str) -> StoreResult<()>;
}

/// In-memory implementation of RecordStore (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryRecordStore {
    key_attribute: String,
    records: Arc<RwLock<BTreeMap<String, Record>>>,
}

impl InMemoryRecordStore {
    /// Store keyed by the `email` attribute
    pub fn new() -> Self {
        Self::with_key_attribute(USER_KEY_ATTRIBUTE)
    }

    pub fn with_key_attribute(key_attribute: impl Into<String>) -> Self {
        Self {
            key_attribute: key_attribute.into(),
            records: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn scan_all(&self) -> StoreResult<Vec<Record>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn put(&self, record: Record) -> StoreResult<()> {
        let key = match record.get(&self.key_attribute) {
            Some(Value::String(key)) if !key.is_empty() => key.clone(),
            _ => {
                return Err(StoreError::new(format!(
                    "record is missing string key attribute '{}'",
                    self.key_attribute
                )));
            }
        };

        self.records.write().await.insert(key.clone(), record);

        tracing::debug!(key = %key, "Stored record");
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        if self.records.write().await.remove(key).is_some() {
            tracing::debug!(key = %key, "Deleted record");
        }
        Ok(())
    }
}
