//! Request-Cache Adapter
//!
//! Wraps a read handler so its output is served from, and stored into, a
//! [`CacheStore`](super::CacheStore).

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::cache::{QueryParams, SharedStore};

// == Cache Status ==
/// Whether a response came from the cache or from the wrapped handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payload tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Cached<V> {
    pub status: CacheStatus,
    pub payload: V,
}

// == Cached Handler ==
/// A read handler wrapped with a cache.
///
/// Built by [`cached`]. The transport layer turns the resulting [`Cached`]
/// into a response; this type performs no I/O of its own.
pub struct CachedHandler<V, K, H> {
    store: SharedStore<V>,
    key_fn: K,
    ttl: Option<Duration>,
    handler: H,
}

/// Wraps `handler` so identical queries are answered from `store`.
///
/// `key_fn` derives the cache key from the query; `ttl` of `None` falls back
/// to the store's default.
pub fn cached<V, K, H>(
    store: SharedStore<V>,
    key_fn: K,
    ttl: Option<Duration>,
    handler: H,
) -> CachedHandler<V, K, H> {
    CachedHandler {
        store,
        key_fn,
        ttl,
        handler,
    }
}

impl<V, K, H, Fut, E> CachedHandler<V, K, H>
where
    V: Clone,
    K: Fn(&QueryParams) -> String,
    H: Fn(QueryParams) -> Fut,
    Fut: Future<Output = Result<V, E>>,
{
    /// Serves `params` from the cache, or runs the handler and caches its output.
    ///
    /// The store lock is released while the handler runs. A handler error is
    /// returned untouched and nothing is stored.
    pub async fn call(&self, params: QueryParams) -> Result<Cached<V>, E> {
        let key = (self.key_fn)(&params);

        let hit = self.store.write().await.get(&key);
        if let Some(payload) = hit {
            debug!(key = %key, "cache hit");
            return Ok(Cached {
                status: CacheStatus::Hit,
                payload,
            });
        }

        debug!(key = %key, "cache miss");
        let payload = (self.handler)(params).await?;

        self.store
            .write()
            .await
            .set(key, payload.clone(), self.ttl);

        Ok(Cached {
            status: CacheStatus::Miss,
            payload,
        })
    }
}
