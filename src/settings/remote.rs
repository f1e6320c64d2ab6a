//! Remote document stores.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

use super::{RemoteStore, StorageError};

/// JSON document store reached over HTTP.
///
/// Documents live at `{base_url}/{collection}/{document_id}`: `GET` returns the
/// document (404 when it does not exist) and `PUT` replaces it.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
}

impl HttpDocumentStore {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn document_url(&self, collection: &str, document_id: &str) -> String {
        format!("{}/{collection}/{document_id}", self.base_url)
    }
}

#[async_trait]
impl RemoteStore for HttpDocumentStore {
    #[instrument(skip(self))]
    async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Option<Value>, StorageError> {
        let url = self.document_url(collection, document_id);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!("Remote document does not exist: {url}");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(StorageError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() || text.trim() == "null" {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    #[instrument(skip(self, document))]
    async fn set_document(
        &self,
        collection: &str,
        document_id: &str,
        document: &Value,
    ) -> Result<(), StorageError> {
        let url = self.document_url(collection, document_id);
        let response = self.client.put(&url).json(document).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(StorageError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }
        debug!("Stored remote document {url} ({status})");
        Ok(())
    }
}

/// Used when no remote store is configured: nothing is ever found and writes are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRemoteStore;

#[async_trait]
impl RemoteStore for DisabledRemoteStore {
    async fn get_document(
        &self,
        _collection: &str,
        _document_id: &str,
    ) -> Result<Option<Value>, StorageError> {
        Ok(None)
    }

    async fn set_document(
        &self,
        collection: &str,
        document_id: &str,
        _document: &Value,
    ) -> Result<(), StorageError> {
        debug!("Remote store disabled, not saving {collection}/{document_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    #[test]
    fn test_document_url_trims_trailing_slash() {
        let store = HttpDocumentStore::new(Client::new(), "https://store.example.com/v1/");
        assert_eq!(
            store.document_url("odds_config", "settings"),
            "https://store.example.com/v1/odds_config/settings"
        );
    }

    #[tokio::test]
    async fn test_get_document_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/odds_config/settings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "apiKey": "k" })))
            .mount(&mock_server)
            .await;

        let store = HttpDocumentStore::new(Client::new(), mock_server.uri());
        let document = store
            .get_document("odds_config", "settings")
            .await
            .unwrap();

        assert_eq!(document, Some(json!({ "apiKey": "k" })));
    }

    #[tokio::test]
    async fn test_get_document_not_found_is_none() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/odds_config/settings"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let store = HttpDocumentStore::new(Client::new(), mock_server.uri());
        let document = store
            .get_document("odds_config", "settings")
            .await
            .unwrap();

        assert!(document.is_none());
    }

    #[tokio::test]
    async fn test_get_document_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let store = HttpDocumentStore::new(Client::new(), mock_server.uri());
        let result = store.get_document("odds_config", "settings").await;

        assert!(matches!(
            result,
            Err(StorageError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_set_document_puts_json() {
        let mock_server = MockServer::start().await;
        let document = json!({ "apiKey": "k", "sports": {} });
        Mock::given(method("PUT"))
            .and(path("/odds_config/settings"))
            .and(body_json(&document))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = HttpDocumentStore::new(Client::new(), mock_server.uri());
        store
            .set_document("odds_config", "settings", &document)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_disabled_store() {
        let store = DisabledRemoteStore;
        assert!(store.get_document("a", "b").await.unwrap().is_none());
        assert!(store.set_document("a", "b", &json!({})).await.is_ok());
    }
}
