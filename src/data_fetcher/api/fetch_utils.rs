//! Single-shot HTTP fetching with status mapping and quota tracking

use reqwest::{Client, Response, StatusCode, header::HeaderMap};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use crate::error::OddsApiError;

const REQUESTS_REMAINING_HEADER: &str = "x-requests-remaining";
const REQUESTS_USED_HEADER: &str = "x-requests-used";

/// Request quota reported by the provider on every response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuotaInfo {
    pub remaining: Option<u32>,
    pub used: Option<u32>,
}

impl QuotaInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let parse = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<f64>().ok())
                .map(|n| n as u32)
        };
        Self {
            remaining: parse(REQUESTS_REMAINING_HEADER),
            used: parse(REQUESTS_USED_HEADER),
        }
    }

    pub fn is_known(&self) -> bool {
        self.remaining.is_some() || self.used.is_some()
    }
}

/// Maps a non-success status to the client's error taxonomy.
///
/// 401 → `ApiKeyInvalid`, 429 → `ApiRateLimit`, 404 → `ResourceNotFound`,
/// anything else → `ApiConnectionError`.
pub fn map_status_error(status: StatusCode, url: &str) -> OddsApiError {
    match status {
        StatusCode::UNAUTHORIZED => OddsApiError::ApiKeyInvalid,
        StatusCode::TOO_MANY_REQUESTS => OddsApiError::rate_limit(url),
        StatusCode::NOT_FOUND => OddsApiError::not_found(url),
        other => OddsApiError::connection(format!(
            "HTTP {} {} (URL: {url})",
            other.as_u16(),
            other.canonical_reason().unwrap_or("Unknown error")
        )),
    }
}

/// Issues one GET. Transport failures become connection errors; the status is not inspected.
///
/// `query` carries the API key, so it is skipped from the span and only `url` is logged.
#[instrument(skip(client, query))]
pub(super) async fn send_get(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<Response, OddsApiError> {
    info!("Fetching data from URL: {url}");

    client.get(url).query(query).send().await.map_err(|e| {
        error!("Request failed for URL {url}: {e}");
        if e.is_timeout() {
            OddsApiError::connection(format!("Request timed out (URL: {url})"))
        } else {
            OddsApiError::connection(format!("{e} (URL: {url})"))
        }
    })
}

/// Fetches and decodes a JSON payload with exactly one request.
///
/// Returns the decoded body with the quota headers of the response.
#[instrument(skip(client, query))]
pub(super) async fn fetch<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, String)],
) -> Result<(T, QuotaInfo), OddsApiError> {
    let response = send_get(client, url, query).await?;
    let status = response.status();
    let quota = QuotaInfo::from_headers(response.headers());

    debug!("Response status: {status}");
    if quota.is_known() {
        debug!(
            "Quota: {:?} requests remaining, {:?} used",
            quota.remaining, quota.used
        );
    }

    if !status.is_success() {
        error!(
            "HTTP {} - {} (URL: {})",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown error"),
            url
        );
        return Err(map_status_error(status, url));
    }

    let response_text = response.text().await.map_err(|e| {
        error!("Failed to read response text from URL {url}: {e}");
        OddsApiError::connection(format!("Failed to read response body: {e}"))
    })?;

    debug!("Response length: {} bytes", response_text.len());

    match serde_json::from_str::<T>(&response_text) {
        Ok(parsed) => Ok((parsed, quota)),
        Err(e) => {
            error!("Failed to parse API response: {e} (URL: {url})");
            error!(
                "Response text (first 200 chars): {}",
                &response_text.chars().take(200).collect::<String>()
            );
            Err(OddsApiError::connection(format!(
                "Unexpected response body: {e} (URL: {url})"
            )))
        }
    }
}
