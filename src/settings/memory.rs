//! In-memory store for tests and throwaway sessions.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::{LocalStore, RemoteStore, StorageError};

/// Implements both [`LocalStore`] and [`RemoteStore`] on top of hash maps.
///
/// `set_failing(true)` makes every operation return [`StorageError::Unavailable`],
/// which is how tests exercise the degrade-and-log paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    documents: RwLock<HashMap<(String, String), Value>>,
    failing: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Successful writes across both tiers
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn insert_entry(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    pub async fn entry(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn insert_document(&self, collection: &str, document_id: &str, document: Value) {
        self.documents
            .write()
            .await
            .insert((collection.to_string(), document_id.to_string()), document);
    }

    pub async fn document(&self, collection: &str, document_id: &str) -> Option<Value> {
        self.documents
            .read()
            .await
            .get(&(collection.to_string(), document_id.to_string()))
            .cloned()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("memory store set to fail".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LocalStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.entry(key).await)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.insert_entry(key, value).await;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<Value>, StorageError> {
        self.check_available()?;
        Ok(self.document(collection, document_id).await)
    }

    async fn set_document(
        &self,
        collection: &str,
        document_id: &str,
        document: &Value,
    ) -> Result<(), StorageError> {
        self.check_available()?;
        self.insert_document(collection, document_id, document.clone())
            .await;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
