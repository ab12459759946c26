//! Named Cache Registry
//!
//! One independently sized response cache per read-heavy domain, built once at
//! startup and handed to handlers and the janitor by reference.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{CacheStats, CacheStore, SharedStore};
use crate::config::{CacheSettings, Config};
use crate::error::AppError;

// == Cache Domain ==
/// The read domains that get their own cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheDomain {
    /// Product listings
    Products,
    /// Category listing
    Categories,
    /// Search results
    Search,
}

impl CacheDomain {
    pub const ALL: [CacheDomain; 3] = [
        CacheDomain::Products,
        CacheDomain::Categories,
        CacheDomain::Search,
    ];

    /// Name used in URLs, cache key prefixes and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheDomain::Products => "products",
            CacheDomain::Categories => "categories",
            CacheDomain::Search => "search",
        }
    }
}

impl fmt::Display for CacheDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheDomain {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CacheDomain::ALL
            .into_iter()
            .find(|domain| domain.as_str() == s)
            .ok_or_else(|| AppError::NotFound(format!("Unknown cache domain: {}", s)))
    }
}

// == Cache Registry ==
/// Fixed set of named caches. Cloning shares the same stores.
#[derive(Clone, Debug)]
pub struct CacheRegistry {
    products: SharedStore,
    categories: SharedStore,
    search: SharedStore,
}

impl CacheRegistry {
    pub fn new(products: CacheSettings, categories: CacheSettings, search: CacheSettings) -> Self {
        Self {
            products: build_store(products),
            categories: build_store(categories),
            search: build_store(search),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.products_cache,
            config.categories_cache,
            config.search_cache,
        )
    }

    /// Returns the store backing `domain`.
    pub fn store(&self, domain: CacheDomain) -> &SharedStore {
        match domain {
            CacheDomain::Products => &self.products,
            CacheDomain::Categories => &self.categories,
            CacheDomain::Search => &self.search,
        }
    }

    /// Iterates over every (domain, store) pair.
    pub fn iter(&self) -> impl Iterator<Item = (CacheDomain, &SharedStore)> {
        CacheDomain::ALL
            .into_iter()
            .map(move |domain| (domain, self.store(domain)))
    }

    // == Invalidate ==
    /// Drops every entry cached for `domain` and returns how many there were.
    ///
    /// Called by write paths after a successful mutation.
    pub async fn invalidate(&self, domain: CacheDomain) -> usize {
        let mut store = self.store(domain).write().await;
        let dropped = store.len();
        store.clear();
        info!(domain = %domain, dropped, "cache invalidated");
        dropped
    }

    /// Invalidates every domain. Returns the total number of entries dropped.
    pub async fn invalidate_all(&self) -> usize {
        let mut total = 0;
        for domain in CacheDomain::ALL {
            total += self.invalidate(domain).await;
        }
        total
    }

    /// Stats snapshot for every domain.
    pub async fn stats(&self) -> Vec<(CacheDomain, CacheStats)> {
        let mut all = Vec::with_capacity(CacheDomain::ALL.len());
        for (domain, store) in self.iter() {
            all.push((domain, store.read().await.stats()));
        }
        all
    }
}

fn build_store(settings: CacheSettings) -> SharedStore {
    Arc::new(RwLock::new(CacheStore::new(
        settings.max_entries,
        settings.ttl(),
    )))
}
