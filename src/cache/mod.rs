//! Cache Module
//!
//! In-memory response caching with TTL expiration and LRU eviction.

mod adapter;
mod entry;
mod key;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

// Re-export public types
pub use adapter::{cached, CacheStatus, Cached, CachedHandler};
pub use entry::CacheEntry;
pub use key::{canonical_key, QueryParams};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Rendered response body held by the response caches. Cloning is a refcount bump.
pub type Payload = Arc<Value>;

/// A store shared between request handlers and the janitor, one lock per store.
pub type SharedStore<V = Payload> = Arc<RwLock<CacheStore<V>>>;
