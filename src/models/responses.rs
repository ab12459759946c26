//! Response DTOs for the storefront API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::registry::CacheDomain;

/// Stats for one named cache, as returned by `GET /api/cache/stats`
#[derive(Debug, Clone, Serialize)]
pub struct DomainStats {
    pub domain: &'static str,
    #[serde(flatten)]
    pub stats: CacheStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub caches: Vec<DomainStats>,
}

impl CacheStatsResponse {
    pub fn new(stats: Vec<(CacheDomain, CacheStats)>) -> Self {
        Self {
            caches: stats
                .into_iter()
                .map(|(domain, stats)| DomainStats {
                    domain: domain.as_str(),
                    stats,
                })
                .collect(),
        }
    }
}

/// Response body for `DELETE /api/cache/:domain`
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub domain: &'static str,
    pub dropped: usize,
}

/// Response body for `DELETE /api/products/:id`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    pub id: u64,
}

impl DeleteResponse {
    pub fn new(id: u64) -> Self {
        Self {
            message: format!("Product {} deleted successfully", id),
            id,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
