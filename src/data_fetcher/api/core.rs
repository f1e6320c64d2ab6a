//! The odds client: configuration resolver plus the provider endpoints.

use chrono::Utc;
use reqwest::{Client, StatusCode};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock, watch};
use tracing::{debug, error, info, instrument, warn};

use crate::config::Config;
use crate::constants::sports::{DEFAULT_MARKETS, DEFAULT_REGIONS, DEFAULT_SCORES_DAYS_FROM};
use crate::data_fetcher::models::{Event, OddsConfig, Sport, SportConfig};
use crate::error::{AppError, OddsApiError};
use crate::settings::OddsStorage;

use super::fetch_utils::{QuotaInfo, fetch, map_status_error, send_get};
use super::http_client::create_http_client_with_timeout;
use super::urls::{build_live_odds_url, build_odds_url, build_scores_url, build_sports_url};

/// Lifecycle of the configuration load that runs when an [`OddsApi`] is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    Uninitialized,
    Initializing,
    Ready,
}

#[derive(Debug)]
struct Shared {
    config: RwLock<OddsConfig>,
    storage: OddsStorage,
    configured: AtomicBool,
    /// Held from mutation until both saves finish, so saves land in mutation order
    persist_lock: Mutex<()>,
}

/// Client for the odds provider.
///
/// Owns the odds configuration: on creation it loads the local copy, then the
/// remote document, and adopts the remote one when it is strictly newer. Every
/// async operation waits for that load to finish first.
///
/// There is no global instance; the composition root creates one and shares it
/// behind an `Arc`.
#[derive(Debug)]
pub struct OddsApi {
    client: Client,
    base_url: String,
    shared: Arc<Shared>,
    init_rx: watch::Receiver<InitState>,
    quota: RwLock<Option<QuotaInfo>>,
}

impl OddsApi {
    /// Creates the client and starts loading the configuration in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(client: Client, base_url: impl Into<String>, storage: OddsStorage) -> Self {
        let shared = Arc::new(Shared {
            config: RwLock::new(OddsConfig::default()),
            storage,
            configured: AtomicBool::new(false),
            persist_lock: Mutex::new(()),
        });
        let (init_tx, init_rx) = watch::channel(InitState::Uninitialized);

        tokio::spawn(initialize(shared.clone(), init_tx));

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            shared,
            init_rx,
            quota: RwLock::new(None),
        }
    }

    /// Builds the HTTP client from the application config.
    pub fn from_config(config: &Config, storage: OddsStorage) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, &config.api_base_url, storage))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn init_state(&self) -> InitState {
        *self.init_rx.borrow()
    }

    /// True once the configuration is loaded and holds an API key.
    pub fn is_configured(&self) -> bool {
        self.init_state() == InitState::Ready && self.shared.configured.load(Ordering::SeqCst)
    }

    /// Waits for the configuration load to complete.
    pub async fn ready(&self) -> Result<(), OddsApiError> {
        self.ensure_initialized().await
    }

    async fn ensure_initialized(&self) -> Result<(), OddsApiError> {
        let mut rx = self.init_rx.clone();
        rx.wait_for(|state| *state == InitState::Ready)
            .await
            .map(|_| ())
            .map_err(|_| {
                OddsApiError::initialization("configuration load ended before completing")
            })
    }

    pub async fn api_key(&self) -> Result<String, OddsApiError> {
        self.ensure_initialized().await?;
        Ok(self.shared.config.read().await.api_key.clone())
    }

    pub async fn get_sport_config(&self, sport_key: &str) -> Result<SportConfig, OddsApiError> {
        self.ensure_initialized().await?;
        Ok(self.shared.config.read().await.sport_config(sport_key))
    }

    pub async fn all_sports_config(&self) -> Result<BTreeMap<String, SportConfig>, OddsApiError> {
        self.ensure_initialized().await?;
        Ok(self.shared.config.read().await.sports.clone())
    }

    pub async fn config_snapshot(&self) -> Result<OddsConfig, OddsApiError> {
        self.ensure_initialized().await?;
        Ok(self.shared.config.read().await.clone())
    }

    /// Quota headers of the most recent provider response, if any were sent.
    pub async fn quota(&self) -> Option<QuotaInfo> {
        *self.quota.read().await
    }

    /// Replaces the API key and persists the configuration to both stores.
    #[instrument(skip(self, api_key))]
    pub async fn set_api_key(&self, api_key: impl Into<String>) -> Result<(), OddsApiError> {
        let api_key = api_key.into();
        self.mutate_and_persist(|config| config.api_key = api_key)
            .await?;
        info!("API key updated");
        Ok(())
    }

    /// Sets one sport's entry (overwriting it) and persists the configuration to both stores.
    #[instrument(skip(self))]
    pub async fn set_sport_config(
        &self,
        sport_key: &str,
        enabled: bool,
        refresh_interval: u64,
    ) -> Result<(), OddsApiError> {
        self.mutate_and_persist(|config| {
            config.sports.insert(
                sport_key.to_string(),
                SportConfig::new(enabled, refresh_interval),
            );
        })
        .await?;
        info!("Sport {sport_key} set to enabled={enabled}, refresh={refresh_interval}s");
        Ok(())
    }

    /// Applies `update`, stamps `last_updated` and saves the result locally, then remotely.
    ///
    /// Mutations are serialized through the persist lock up to the end of the
    /// remote save, so the stores always end up holding the latest snapshot.
    /// The config write lock itself is released before any I/O.
    async fn mutate_and_persist(
        &self,
        update: impl FnOnce(&mut OddsConfig),
    ) -> Result<(), OddsApiError> {
        self.ensure_initialized().await?;
        let _persist_guard = self.shared.persist_lock.lock().await;

        let snapshot = {
            let mut config = self.shared.config.write().await;
            update(&mut config);
            config.last_updated = Some(Utc::now());
            self.shared
                .configured
                .store(config.has_api_key(), Ordering::SeqCst);
            config.clone()
        };

        self.shared.storage.save_local(&snapshot).await;
        self.shared.storage.save_remote(&snapshot).await;
        Ok(())
    }

    /// Runs the pre-request checks and returns the API key to send.
    async fn authorize(&self, sport_key: Option<&str>) -> Result<String, OddsApiError> {
        self.ensure_initialized().await?;
        let config = self.shared.config.read().await;

        if !config.has_api_key() {
            return Err(OddsApiError::ApiKeyRequired);
        }
        if let Some(sport_key) = sport_key
            && !config.sport_config(sport_key).enabled
        {
            debug!("Refusing request for disabled sport {sport_key}");
            return Err(OddsApiError::sport_disabled(sport_key));
        }

        Ok(config.api_key.clone())
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        api_key: String,
        params: &[(&str, String)],
    ) -> Result<T, OddsApiError> {
        let mut query = Vec::with_capacity(params.len() + 1);
        query.push(("apiKey", api_key));
        query.extend(params.iter().cloned());

        let (data, quota) = fetch(&self.client, url, &query).await?;
        if quota.is_known() {
            *self.quota.write().await = Some(quota);
        }
        Ok(data)
    }

    /// Lists every sport the provider knows about.
    #[instrument(skip(self))]
    pub async fn get_sports(&self) -> Result<Vec<Sport>, OddsApiError> {
        let api_key = self.authorize(None).await?;
        let url = build_sports_url(&self.base_url);
        self.get(&url, api_key, &[]).await
    }

    /// Pre-match head-to-head odds for a sport from European bookmakers.
    pub async fn get_odds(&self, sport_key: &str) -> Result<Vec<Event>, OddsApiError> {
        self.get_odds_in_regions(sport_key, DEFAULT_REGIONS).await
    }

    #[instrument(skip(self))]
    pub async fn get_odds_in_regions(
        &self,
        sport_key: &str,
        regions: &str,
    ) -> Result<Vec<Event>, OddsApiError> {
        let api_key = self.authorize(Some(sport_key)).await?;
        let url = build_odds_url(&self.base_url, sport_key);
        self.get(
            &url,
            api_key,
            &[
                ("regions", regions.to_string()),
                ("markets", DEFAULT_MARKETS.to_string()),
            ],
        )
        .await
    }

    /// Head-to-head odds for matches currently in play.
    #[instrument(skip(self))]
    pub async fn get_live_events(&self, sport_key: &str) -> Result<Vec<Event>, OddsApiError> {
        let api_key = self.authorize(Some(sport_key)).await?;
        let url = build_live_odds_url(&self.base_url, sport_key);
        self.get(&url, api_key, &[("markets", DEFAULT_MARKETS.to_string())])
            .await
    }

    /// Live and recently completed matches with scores. `days_from` defaults to 1 when `None`.
    #[instrument(skip(self))]
    pub async fn get_scores(
        &self,
        sport_key: &str,
        days_from: Option<u32>,
    ) -> Result<Vec<Event>, OddsApiError> {
        let api_key = self.authorize(Some(sport_key)).await?;
        let url = build_scores_url(&self.base_url, sport_key);
        let days_from = days_from.unwrap_or(DEFAULT_SCORES_DAYS_FROM);
        self.get(&url, api_key, &[("daysFrom", days_from.to_string())])
            .await
    }

    /// Checks a candidate API key against the sports list without touching the configuration.
    ///
    /// `Ok(true)` for 200, `Ok(false)` for any other success status.
    #[instrument(skip(self, api_key))]
    pub async fn test_connection(&self, api_key: &str) -> Result<bool, OddsApiError> {
        let url = build_sports_url(&self.base_url);
        let response = send_get(&self.client, &url, &[("apiKey", api_key.to_string())]).await?;
        let status = response.status();

        match status {
            StatusCode::OK => Ok(true),
            s if s.is_success() => {
                warn!("Connection test returned {s}, treating key as unusable");
                Ok(false)
            }
            StatusCode::UNAUTHORIZED | StatusCode::TOO_MANY_REQUESTS => {
                Err(map_status_error(status, &url))
            }
            s => Err(OddsApiError::connection(format!(
                "HTTP {} during connection test (URL: {url})",
                s.as_u16()
            ))),
        }
    }
}

/// Loads local then remote configuration and publishes `Ready` when done.
async fn initialize(shared: Arc<Shared>, init_tx: watch::Sender<InitState>) {
    init_tx.send_replace(InitState::Initializing);
    debug!("Loading odds configuration");

    let mut config = shared.config.write().await;

    if let Some(local) = shared.storage.load_local().await {
        debug!("Using locally saved odds configuration");
        *config = local;
    }

    if let Some(remote) = shared.storage.load_remote().await {
        if remote.is_newer_than(&config) {
            info!(
                "Adopting newer remote odds configuration (remote {:?}, local {:?})",
                remote.last_updated, config.last_updated
            );
            *config = remote;
            shared.storage.save_local(&config).await;
        } else {
            debug!("Remote odds configuration is not newer, keeping local");
        }
    }

    if !config.has_api_key() {
        warn!("No odds API key configured");
    }
    shared
        .configured
        .store(config.has_api_key(), Ordering::SeqCst);
    drop(config);

    if init_tx.send(InitState::Ready).is_err() {
        // Every handle was dropped while loading
        error!("Odds client dropped before initialization finished");
    }
}
