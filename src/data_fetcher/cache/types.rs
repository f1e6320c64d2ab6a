//! Cache data structures with TTL support

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::constants::cache_ttl;

/// The four data queries the screens issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOperation {
    Sports,
    Odds,
    LiveEvents,
    Scores,
}

impl QueryOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOperation::Sports => "sports",
            QueryOperation::Odds => "odds",
            QueryOperation::LiveEvents => "live-events",
            QueryOperation::Scores => "scores",
        }
    }

    /// How long a successful result is served without refetching
    pub fn stale_after(&self) -> Duration {
        let seconds = match self {
            QueryOperation::Sports => cache_ttl::SPORTS_SECONDS,
            QueryOperation::Odds => cache_ttl::ODDS_SECONDS,
            QueryOperation::LiveEvents => cache_ttl::LIVE_EVENTS_SECONDS,
            QueryOperation::Scores => cache_ttl::SCORES_SECONDS,
        };
        Duration::from_secs(seconds)
    }

    /// Polling interval while the query is on screen; only live events poll
    pub fn refetch_interval(&self) -> Option<Duration> {
        match self {
            QueryOperation::LiveEvents => {
                Some(Duration::from_secs(cache_ttl::LIVE_EVENTS_REFETCH_SECONDS))
            }
            _ => None,
        }
    }
}

impl fmt::Display for QueryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache key: the operation plus the sport it is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub operation: QueryOperation,
    pub sport: Option<String>,
}

impl QueryKey {
    pub fn sports() -> Self {
        Self {
            operation: QueryOperation::Sports,
            sport: None,
        }
    }

    pub fn for_sport(operation: QueryOperation, sport: &str) -> Self {
        Self {
            operation,
            sport: Some(sport.to_string()),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sport {
            Some(sport) => write!(f, "{}:{sport}", self.operation),
            None => write!(f, "{}", self.operation),
        }
    }
}

/// A successful query result with its fetch time.
#[derive(Debug)]
pub struct CachedQuery<T> {
    pub data: Arc<T>,
    pub cached_at: Instant,
    pub stale_after: Duration,
}

impl<T> Clone for CachedQuery<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            cached_at: self.cached_at,
            stale_after: self.stale_after,
        }
    }
}

impl<T> CachedQuery<T> {
    pub fn new(data: Arc<T>, stale_after: Duration) -> Self {
        Self {
            data,
            cached_at: Instant::now(),
            stale_after,
        }
    }

    pub fn is_expired(&self) -> bool {
        let age = self.cached_at.elapsed();
        let is_expired = age > self.stale_after;

        debug!(
            "Cache expiration check: age={:?}, ttl={:?}, is_expired={}",
            age, self.stale_after, is_expired
        );

        is_expired
    }

    /// Gets the remaining time until expiration
    pub fn time_until_expiry(&self) -> Duration {
        self.stale_after.saturating_sub(self.cached_at.elapsed())
    }
}
