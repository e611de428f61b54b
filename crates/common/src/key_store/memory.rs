use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::provider::KeyStore;

/// In-memory key store backed by a HashMap
///
/// Clones share the same map. Nothing survives the process, which makes this
/// the backend for tests and for ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryKeyStoreError {
    #[error("memory key store error: {0}")]
    Internal(String),
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> Result<usize, MemoryKeyStoreError> {
        let inner = self.inner.read().map_err(|e| {
            MemoryKeyStoreError::Internal(format!("failed to acquire read lock: {}", e))
        })?;
        Ok(inner.len())
    }

    pub fn is_empty(&self) -> Result<bool, MemoryKeyStoreError> {
        Ok(self.len()? == 0)
    }
}

impl KeyStore for MemoryKeyStore {
    type Error = MemoryKeyStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let inner = self.inner.read().map_err(|e| {
            MemoryKeyStoreError::Internal(format!("failed to acquire read lock: {}", e))
        })?;

        Ok(inner.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut inner = self.inner.write().map_err(|e| {
            MemoryKeyStoreError::Internal(format!("failed to acquire write lock: {}", e))
        })?;

        inner.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        let mut inner = self.inner.write().map_err(|e| {
            MemoryKeyStoreError::Internal(format!("failed to acquire write lock: {}", e))
        })?;

        inner.remove(key);
        Ok(())
    }
}
