//! Cache abstractions: the durable write-through cache contract and an
//! in-process TTL cache for short-lived snapshots.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Durable cache contract for prediction payloads.
///
/// Both operations are infallible at the call site: the cache must never
/// fail or block the request pipeline. Implementations absorb backend
/// errors, reporting a miss on `get` and dropping the write on `set`.
pub trait PredictionCache: Send + Sync {
    /// Look up a serialized payload. A degraded backend reads as a miss.
    fn get<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = Option<String>> + Send + 'a>>;

    /// Store a serialized payload with a TTL, best-effort.
    fn set<'a>(
        &'a self,
        key: &'a str,
        value: String,
        ttl: Duration,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

/// Cache that always misses and drops every write.
///
/// Backs configurations without a durable backend and deterministic tests.
#[derive(Debug, Default)]
pub struct NoopCache;

impl PredictionCache for NoopCache {
    fn get<'a>(&'a self, _key: &'a str) -> Pin<Box<dyn Future<Output = Option<String>> + Send + 'a>> {
        Box::pin(async move { None })
    }

    fn set<'a>(
        &'a self,
        _key: &'a str,
        _value: String,
        _ttl: Duration,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {})
    }
}

#[derive(Debug, Clone)]
struct TtlEntry<T> {
    value: T,
    stored_at: Instant,
}

#[derive(Debug)]
struct TtlInner<T> {
    map: HashMap<String, TtlEntry<T>>,
    ttl: Duration,
}

impl<T: Clone> TtlInner<T> {
    fn get(&self, key: &str) -> Option<T> {
        self.map.get(key).and_then(|entry| {
            if entry.stored_at.elapsed() <= self.ttl {
                Some(entry.value.clone())
            } else {
                None
            }
        })
    }

    fn put(&mut self, key: String, value: T) {
        self.map.insert(
            key,
            TtlEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }
}

/// Thread-safe in-process TTL cache.
///
/// Expiry is checked lazily on read; stale entries are overwritten by the
/// next writer rather than purged in the background. Concurrent writers to
/// the same key race and the last write wins, which is acceptable because
/// every cached computation here is idempotent.
#[derive(Debug, Clone)]
pub struct TtlCache<T> {
    inner: Arc<tokio::sync::RwLock<TtlInner<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(tokio::sync::RwLock::new(TtlInner {
                map: HashMap::new(),
                ttl,
            })),
        }
    }

    /// Get a cached value if present and not older than the TTL.
    pub async fn get(&self, key: &str) -> Option<T> {
        let store = self.inner.read().await;
        store.get(key)
    }

    /// Insert a value, replacing any previous entry for the key.
    pub async fn put(&self, key: String, value: T) {
        let mut store = self.inner.write().await;
        store.put(key, value);
    }

    /// Number of entries, including ones past their TTL.
    pub async fn len(&self) -> usize {
        let store = self.inner.read().await;
        store.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
