//! Per-instance LRU cache for query results

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::types::{CachedQuery, QueryKey};

/// LRU cache of query results keyed by [`QueryKey`], expiring entries on read.
#[derive(Debug)]
pub struct QueryCache<T> {
    entries: RwLock<LruCache<QueryKey, CachedQuery<T>>>,
}

impl<T> QueryCache<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Returns the cached data if present and within its staleness window.
    /// Expired entries are removed.
    #[instrument(skip(self, key), fields(cache_key = %key))]
    pub async fn get_fresh(&self, key: &QueryKey) -> Option<Arc<T>> {
        let mut cache = self.entries.write().await;

        let expired = match cache.get(key) {
            Some(entry) if !entry.is_expired() => {
                debug!("Cache hit for {key}");
                return Some(Arc::clone(&entry.data));
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!("Cache entry expired for {key}, removing");
            cache.pop(key);
        } else {
            debug!("Cache miss for {key}");
        }
        None
    }

    pub async fn put(&self, key: QueryKey, entry: CachedQuery<T>) {
        debug!("Caching {key} for {:?}", entry.stale_after);
        self.entries.write().await.put(key, entry);
    }

    pub async fn invalidate(&self, key: &QueryKey) -> bool {
        self.entries.write().await.pop(key).is_some()
    }

    pub async fn invalidate_all(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::cache::types::QueryOperation;
    use std::time::Duration;

    #[tokio::test]
    async fn test_put_and_get_fresh() {
        let cache = QueryCache::new(4);
        let key = QueryKey::for_sport(QueryOperation::Odds, "soccer_epl");
        cache
            .put(
                key.clone(),
                CachedQuery::new(Arc::new(vec![1, 2]), Duration::from_secs(60)),
            )
            .await;

        assert_eq!(cache.get_fresh(&key).await.as_deref(), Some(&vec![1, 2]));
        assert!(
            cache
                .get_fresh(&QueryKey::for_sport(QueryOperation::Scores, "soccer_epl"))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_expired_entry_is_removed() {
        let cache = QueryCache::new(4);
        let key = QueryKey::sports();
        cache
            .put(key.clone(), CachedQuery::new(Arc::new(1), Duration::ZERO))
            .await;
        tokio::time::sleep(Duration::from_millis(5)).await;

        assert!(cache.get_fresh(&key).await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_lru_eviction_and_invalidation() {
        let cache = QueryCache::new(2);
        let a = QueryKey::for_sport(QueryOperation::Odds, "a");
        let b = QueryKey::for_sport(QueryOperation::Odds, "b");
        let c = QueryKey::for_sport(QueryOperation::Odds, "c");
        for key in [&a, &b, &c] {
            cache
                .put(key.clone(), CachedQuery::new(Arc::new(0), Duration::from_secs(60)))
                .await;
        }

        assert_eq!(cache.len().await, 2);
        assert!(cache.get_fresh(&a).await.is_none());
        assert!(cache.invalidate(&b).await);
        assert!(!cache.invalidate(&b).await);
        cache.invalidate_all().await;
        assert!(cache.is_empty().await);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let cache: QueryCache<u8> = QueryCache::new(0);
        assert_eq!(cache.entries.try_read().unwrap().cap().get(), 1);
    }
}
