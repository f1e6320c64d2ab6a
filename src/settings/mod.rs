//! Two-tier persistence for the odds configuration.
//!
//! The configuration lives in a single local key-value entry and in a single
//! remote document. Backends report failures through [`StorageError`];
//! [`OddsStorage`] is the layer that logs them and degrades: reads become
//! "nothing saved" and writes become best effort.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::constants::storage::{REMOTE_COLLECTION, REMOTE_DOCUMENT_ID, STORAGE_KEY};
use crate::data_fetcher::models::OddsConfig;

pub mod local;
pub mod memory;
pub mod remote;

pub use local::FileLocalStore;
pub use memory::MemoryStore;
pub use remote::{DisabledRemoteStore, HttpDocumentStore};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Document store returned {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store on this machine.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A remote JSON document store addressed by collection and document id.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Returns `Ok(None)` when the document does not exist.
    async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<Value>, StorageError>;

    async fn set_document(
        &self,
        collection: &str,
        document_id: &str,
        document: &Value,
    ) -> Result<(), StorageError>;
}

/// Settings store façade over a local and a remote backend.
#[derive(Clone)]
pub struct OddsStorage {
    local: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteStore>,
}

impl std::fmt::Debug for OddsStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OddsStorage").finish_non_exhaustive()
    }
}

impl OddsStorage {
    pub fn new(local: Arc<dyn LocalStore>, remote: Arc<dyn RemoteStore>) -> Self {
        Self { local, remote }
    }

    /// Loads the locally saved configuration, defaults merged in.
    #[instrument(skip(self))]
    pub async fn load_local(&self) -> Option<OddsConfig> {
        let raw = match self.local.read(STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No local odds configuration saved under '{STORAGE_KEY}'");
                return None;
            }
            Err(e) => {
                error!("Error loading odds configuration from local store: {e}");
                return None;
            }
        };

        match serde_json::from_str::<OddsConfig>(&raw) {
            Ok(config) => Some(config.with_default_sports()),
            Err(e) => {
                error!("Error parsing local odds configuration: {e}");
                None
            }
        }
    }

    /// Loads the remote configuration document, defaults merged in.
    #[instrument(skip(self))]
    pub async fn load_remote(&self) -> Option<OddsConfig> {
        let document = match self
            .remote
            .get_document(REMOTE_COLLECTION, REMOTE_DOCUMENT_ID)
            .await
        {
            Ok(Some(document)) => document,
            Ok(None) => {
                debug!("No remote odds configuration document {REMOTE_COLLECTION}/{REMOTE_DOCUMENT_ID}");
                return None;
            }
            Err(e) => {
                error!("Error loading odds configuration from remote store: {e}");
                return None;
            }
        };

        match serde_json::from_value::<OddsConfig>(document) {
            Ok(config) => Some(config.with_default_sports()),
            Err(e) => {
                error!("Error parsing remote odds configuration: {e}");
                None
            }
        }
    }

    /// Best effort: failures are logged, never returned.
    #[instrument(skip(self, config))]
    pub async fn save_local(&self, config: &OddsConfig) {
        let serialized = match serde_json::to_string(config) {
            Ok(serialized) => serialized,
            Err(e) => {
                error!("Error serializing odds configuration: {e}");
                return;
            }
        };

        match self.local.write(STORAGE_KEY, &serialized).await {
            Ok(()) => debug!("Saved odds configuration to local store"),
            Err(e) => error!("Error saving odds configuration to local store: {e}"),
        }
    }

    /// Best effort: failures are logged, never returned.
    #[instrument(skip(self, config))]
    pub async fn save_remote(&self, config: &OddsConfig) {
        let document = match serde_json::to_value(config) {
            Ok(document) => document,
            Err(e) => {
                error!("Error serializing odds configuration: {e}");
                return;
            }
        };

        match self
            .remote
            .set_document(REMOTE_COLLECTION, REMOTE_DOCUMENT_ID, &document)
            .await
        {
            Ok(()) => info!("Saved odds configuration to remote store"),
            Err(e) => error!("Error saving odds configuration to remote store: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::sports::DEFAULT_SPORT_KEYS;
    use crate::data_fetcher::models::SportConfig;
    use serde_json::json;

    fn storage_with(store: &Arc<MemoryStore>) -> OddsStorage {
        OddsStorage::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn test_load_local_missing_is_none() {
        let store = Arc::new(MemoryStore::new());
        assert_eq!(storage_with(&store).load_local().await, None);
    }

    #[tokio::test]
    async fn test_load_local_merges_partial_sports_over_defaults() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_entry(
                STORAGE_KEY,
                r#"{"apiKey":"k","sports":{"soccer_epl":{"enabled":false,"refreshInterval":60},"soccer_x":{"enabled":true,"refreshInterval":30}}}"#,
            )
            .await;

        let config = storage_with(&store).load_local().await.unwrap();

        assert_eq!(config.api_key, "k");
        assert_eq!(config.sports.len(), DEFAULT_SPORT_KEYS.len() + 1);
        assert_eq!(config.sports["soccer_epl"], SportConfig::new(false, 60));
        assert_eq!(config.sports["soccer_x"], SportConfig::new(true, 30));
        assert_eq!(
            config.sports["soccer_france_ligue_one"],
            SportConfig::new(true, 30)
        );
    }

    #[tokio::test]
    async fn test_load_local_corrupt_entry_is_none() {
        let store = Arc::new(MemoryStore::new());
        store.insert_entry(STORAGE_KEY, "{not json").await;
        assert_eq!(storage_with(&store).load_local().await, None);
    }

    #[tokio::test]
    async fn test_load_remote_merges_defaults() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_document(
                REMOTE_COLLECTION,
                REMOTE_DOCUMENT_ID,
                json!({ "apiKey": "remote", "lastUpdated": "2024-01-15T10:00:00Z" }),
            )
            .await;

        let config = storage_with(&store).load_remote().await.unwrap();
        assert_eq!(config.api_key, "remote");
        assert_eq!(config.sports.len(), DEFAULT_SPORT_KEYS.len());
        assert!(config.last_updated.is_some());
    }

    #[tokio::test]
    async fn test_failing_store_degrades_to_none() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_entry(STORAGE_KEY, r#"{"apiKey":"k"}"#)
            .await;
        store.set_failing(true);

        let storage = storage_with(&store);
        assert_eq!(storage.load_local().await, None);
        assert_eq!(storage.load_remote().await, None);
    }

    #[tokio::test]
    async fn test_save_failures_are_swallowed() {
        let store = Arc::new(MemoryStore::new());
        store.set_failing(true);
        let storage = storage_with(&store);

        // Neither call returns an error or panics
        storage.save_local(&OddsConfig::default()).await;
        storage.save_remote(&OddsConfig::default()).await;

        store.set_failing(false);
        assert_eq!(store.entry(STORAGE_KEY).await, None);
        assert_eq!(
            store.document(REMOTE_COLLECTION, REMOTE_DOCUMENT_ID).await,
            None
        );
    }

    #[tokio::test]
    async fn test_save_then_load_both_tiers() {
        let store = Arc::new(MemoryStore::new());
        let storage = storage_with(&store);
        let mut config = OddsConfig::default();
        config.api_key = "secret".to_string();
        config
            .sports
            .insert("tennis_atp".to_string(), SportConfig::new(true, 10));

        storage.save_local(&config).await;
        storage.save_remote(&config).await;

        assert_eq!(storage.load_local().await, Some(config.clone()));
        assert_eq!(storage.load_remote().await, Some(config));
    }
}
