//! Cached, retrying data queries used by the screens.
//!
//! Each query serves a cached result while it is fresh, otherwise calls the
//! odds client, retrying failures with exponential backoff. Queries that
//! cannot run (no API key, no sport) report [`QueryState::Disabled`] instead
//! of issuing a request.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use crate::constants::{QUERY_CACHE_CAPACITY, retry};
use crate::data_fetcher::api::OddsApi;
use crate::data_fetcher::cache::{CachedQuery, QueryCache, QueryKey, QueryOperation};
use crate::data_fetcher::models::{Event, Sport};
use crate::error::OddsApiError;

/// Outcome of a query as seen by a screen.
#[derive(Debug)]
pub enum QueryState<T> {
    /// The query was not run
    Disabled,
    Success(Arc<T>),
    Error(OddsApiError),
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            QueryState::Disabled => QueryState::Disabled,
            QueryState::Success(data) => QueryState::Success(Arc::clone(data)),
            QueryState::Error(err) => QueryState::Error(err.clone()),
        }
    }
}

impl<T> QueryState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&OddsApiError> {
        match self {
            QueryState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, QueryState::Disabled)
    }
}

/// Retry policy for the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Retries after the first failure, so `max_retries + 1` attempts at most
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub retry_max_delay: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            max_retries: retry::MAX_RETRIES,
            retry_base_delay: Duration::from_millis(retry::BASE_DELAY_MS),
            retry_max_delay: Duration::from_secs(retry::MAX_DELAY_SECONDS),
        }
    }
}

impl QueryOptions {
    /// Same retry count, no waiting between attempts
    pub fn without_backoff() -> Self {
        Self {
            retry_base_delay: Duration::ZERO,
            retry_max_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Whether a query that has now failed `failure_count` times should try again.
/// Disabled sports are a configuration decision, so they are never retried.
pub fn should_retry(failure_count: u32, err: &OddsApiError, max_retries: u32) -> bool {
    failure_count <= max_retries && !err.is_business_rule()
}

/// Backoff before the next attempt: base doubled per failure, capped.
pub fn retry_delay(options: &QueryOptions, failure_count: u32) -> Duration {
    let exponent = failure_count.saturating_sub(1).min(16);
    options
        .retry_base_delay
        .saturating_mul(1u32 << exponent)
        .min(options.retry_max_delay)
}

/// The data queries behind the screens, each with its own result cache.
#[derive(Debug)]
pub struct OddsQueries {
    api: Arc<OddsApi>,
    sports: QueryCache<Vec<Sport>>,
    events: QueryCache<Vec<Event>>,
    options: QueryOptions,
}

impl OddsQueries {
    pub fn new(api: Arc<OddsApi>) -> Self {
        Self::with_options(api, QueryOptions::default())
    }

    pub fn with_options(api: Arc<OddsApi>, options: QueryOptions) -> Self {
        Self {
            api,
            sports: QueryCache::new(QUERY_CACHE_CAPACITY),
            events: QueryCache::new(QUERY_CACHE_CAPACITY),
            options,
        }
    }

    pub fn api(&self) -> &Arc<OddsApi> {
        &self.api
    }

    /// Polling interval for the live events screen
    pub fn live_refetch_interval(&self) -> Duration {
        QueryOperation::LiveEvents
            .refetch_interval()
            .unwrap_or_else(|| QueryOperation::LiveEvents.stale_after())
    }

    /// Drops one cached result so the next query refetches it.
    pub async fn invalidate(&self, key: &QueryKey) {
        let removed = match key.operation {
            QueryOperation::Sports => self.sports.invalidate(key).await,
            _ => self.events.invalidate(key).await,
        };
        debug!("Invalidated {key} (was cached: {removed})");
    }

    pub async fn invalidate_all(&self) {
        self.sports.invalidate_all().await;
        self.events.invalidate_all().await;
        debug!("Invalidated all cached queries");
    }

    /// Waits for the client's configuration, then reports whether queries may run.
    async fn enabled(&self) -> Result<bool, OddsApiError> {
        self.api.ready().await?;
        Ok(self.api.is_configured())
    }

    pub async fn sports(&self) -> QueryState<Vec<Sport>> {
        match self.enabled().await {
            Ok(true) => {}
            Ok(false) => return QueryState::Disabled,
            Err(err) => return QueryState::Error(err),
        }
        let api = &self.api;
        self.run(&self.sports, QueryKey::sports(), || api.get_sports())
            .await
    }

    pub async fn odds(&self, sport: &str) -> QueryState<Vec<Event>> {
        let api = &self.api;
        self.run_for_sport(QueryOperation::Odds, sport, || api.get_odds(sport))
            .await
    }

    pub async fn live_events(&self, sport: &str) -> QueryState<Vec<Event>> {
        let api = &self.api;
        self.run_for_sport(QueryOperation::LiveEvents, sport, || {
            api.get_live_events(sport)
        })
        .await
    }

    pub async fn scores(&self, sport: &str) -> QueryState<Vec<Event>> {
        let api = &self.api;
        self.run_for_sport(QueryOperation::Scores, sport, || {
            api.get_scores(sport, None)
        })
        .await
    }

    async fn run_for_sport<F, Fut>(
        &self,
        operation: QueryOperation,
        sport: &str,
        fetch: F,
    ) -> QueryState<Vec<Event>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Vec<Event>, OddsApiError>>,
    {
        if sport.is_empty() {
            return QueryState::Disabled;
        }
        match self.enabled().await {
            Ok(true) => {}
            Ok(false) => return QueryState::Disabled,
            Err(err) => return QueryState::Error(err),
        }
        self.run(&self.events, QueryKey::for_sport(operation, sport), fetch)
            .await
    }

    #[instrument(skip(self, cache, fetch), fields(query = %key))]
    async fn run<T, F, Fut>(&self, cache: &QueryCache<T>, key: QueryKey, mut fetch: F) -> QueryState<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, OddsApiError>>,
    {
        if let Some(data) = cache.get_fresh(&key).await {
            return QueryState::Success(data);
        }

        let sport = key.sport.as_deref().unwrap_or("-");
        let mut failure_count = 0u32;
        loop {
            match fetch().await {
                Ok(data) => {
                    let data = Arc::new(data);
                    cache
                        .put(
                            key.clone(),
                            CachedQuery::new(Arc::clone(&data), key.operation.stale_after()),
                        )
                        .await;
                    return QueryState::Success(data);
                }
                Err(err) => {
                    failure_count += 1;
                    if !should_retry(failure_count, &err, self.options.max_retries) {
                        error!(
                            "Error fetching {} for sport {sport}: {err} ({})",
                            key.operation,
                            err.code()
                        );
                        return QueryState::Error(err);
                    }
                    let delay = retry_delay(&self.options, failure_count);
                    warn!(
                        "Fetching {} for sport {sport} failed: {err}. Retrying in {delay:?} (attempt {}/{})",
                        key.operation,
                        failure_count + 1,
                        self.options.max_retries + 1
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::storage::STORAGE_KEY;
    use crate::data_fetcher::api::create_http_client_with_timeout;
    use crate::error::ErrorCode;
    use crate::settings::{MemoryStore, OddsStorage};
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    async fn queries_for(base_url: &str, local_config: Option<&str>) -> OddsQueries {
        let store = Arc::new(MemoryStore::new());
        if let Some(config) = local_config {
            store.insert_entry(STORAGE_KEY, config).await;
        }
        let storage = OddsStorage::new(store.clone(), store);
        let client = create_http_client_with_timeout(5).unwrap();
        let api = Arc::new(OddsApi::new(client, base_url, storage));
        OddsQueries::with_options(api, QueryOptions::without_backoff())
    }

    #[test]
    fn test_should_retry_caps_and_skips_disabled_sport() {
        let transient = OddsApiError::connection("boom");
        assert!(should_retry(1, &transient, 2));
        assert!(should_retry(2, &transient, 2));
        assert!(!should_retry(3, &transient, 2));
        assert!(!should_retry(1, &OddsApiError::sport_disabled("soccer_epl"), 2));
    }

    #[test]
    fn test_retry_delay_doubles_and_caps() {
        let options = QueryOptions::default();
        assert_eq!(retry_delay(&options, 1), Duration::from_secs(1));
        assert_eq!(retry_delay(&options, 2), Duration::from_secs(2));
        assert_eq!(retry_delay(&options, 3), Duration::from_secs(4));
        assert_eq!(retry_delay(&options, 10), Duration::from_secs(30));
        assert_eq!(retry_delay(&options, u32::MAX), Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_disabled_without_api_key() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&mock_server)
            .await;

        let queries = queries_for(&mock_server.uri(), None).await;
        assert!(queries.sports().await.is_disabled());
        assert!(queries.odds("soccer_epl").await.is_disabled());
    }

    #[tokio::test]
    async fn test_disabled_for_empty_sport() {
        let queries = queries_for("http://127.0.0.1:1", Some(r#"{"apiKey":"k"}"#)).await;
        assert!(queries.live_events("").await.is_disabled());
        assert!(queries.scores("").await.is_disabled());
    }

    #[tokio::test]
    async fn test_fresh_result_is_served_from_cache() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/soccer_epl/odds"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let queries = queries_for(&mock_server.uri(), Some(r#"{"apiKey":"k"}"#)).await;
        let first = queries.odds("soccer_epl").await;
        let second = queries.odds("soccer_epl").await;

        assert_eq!(first.data().map(Vec::len), Some(0));
        assert_eq!(second.data().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/soccer_epl/scores"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(2)
            .mount(&mock_server)
            .await;

        let queries = queries_for(&mock_server.uri(), Some(r#"{"apiKey":"k"}"#)).await;
        queries.scores("soccer_epl").await;
        queries
            .invalidate(&QueryKey::for_sport(QueryOperation::Scores, "soccer_epl"))
            .await;
        queries.scores("soccer_epl").await;
    }

    #[tokio::test]
    async fn test_transient_failures_retry_twice() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&mock_server)
            .await;

        let queries = queries_for(&mock_server.uri(), Some(r#"{"apiKey":"k"}"#)).await;
        let state = queries.live_events("soccer_epl").await;

        assert_eq!(
            state.error().map(OddsApiError::code),
            Some(ErrorCode::ApiConnectionError)
        );
    }

    #[tokio::test]
    async fn test_retry_recovers_after_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let queries = queries_for(&mock_server.uri(), Some(r#"{"apiKey":"k"}"#)).await;
        assert!(queries.sports().await.data().is_some());
    }

    #[tokio::test]
    async fn test_disabled_sport_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&mock_server)
            .await;

        let queries = queries_for(
            &mock_server.uri(),
            Some(r#"{"apiKey":"k","sports":{"soccer_epl":{"enabled":false,"refreshInterval":30}}}"#),
        )
        .await;
        let state = queries.odds("soccer_epl").await;

        assert_eq!(
            state.error().map(OddsApiError::code),
            Some(ErrorCode::SportDisabled)
        );
    }

    #[tokio::test]
    async fn test_live_refetch_interval() {
        let queries = queries_for("http://127.0.0.1:1", None).await;
        assert_eq!(queries.live_refetch_interval(), Duration::from_secs(30));
    }
}
