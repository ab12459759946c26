//! Storefront Cache - storefront read API with in-process response caching
//!
//! Per-domain TTL/LRU caches sit in front of the product listing, category
//! and search endpoints; product writes invalidate them and a janitor sweeps
//! expired entries.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use registry::{CacheDomain, CacheRegistry};
pub use tasks::spawn_janitor;
