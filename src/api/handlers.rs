//! API Handlers
//!
//! HTTP request handlers for the storefront endpoints. Listing, category and
//! search reads go through the response cache; product writes invalidate it.

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use crate::cache::{cached, canonical_key, Cached, Payload, QueryParams};
use crate::catalog::{Catalog, ListQuery, Product, SearchQuery, SharedCatalog};
use crate::error::Result;
use crate::models::{
    CacheStatsResponse, CreateProductRequest, DeleteResponse, HealthResponse, InvalidateResponse,
    UpdateProductRequest,
};
use crate::registry::{CacheDomain, CacheRegistry};

/// Response header carrying `HIT` or `MISS` on cached endpoints.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Product data source
    pub catalog: SharedCatalog,
    /// Named response caches
    pub caches: CacheRegistry,
}

impl AppState {
    pub fn new(catalog: Catalog, caches: CacheRegistry) -> Self {
        Self {
            catalog: catalog.shared(),
            caches,
        }
    }

    /// Creates a new AppState from configuration with an empty catalog.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(Catalog::new(), CacheRegistry::from_config(config))
    }

    /// Any product mutation can change listings, category counts and search
    /// results, so every domain is dropped.
    async fn catalog_changed(&self) {
        let dropped = self.caches.invalidate_all().await;
        debug!(dropped, "catalog changed");
    }
}

// == Cached Responses ==
impl IntoResponse for Cached<Payload> {
    fn into_response(self) -> Response {
        (
            [(CACHE_STATUS_HEADER, self.status.as_str())],
            Json(self.payload.as_ref()),
        )
            .into_response()
    }
}

/// Runs `handler` behind the cache for `domain`.
async fn serve_cached<H, Fut>(
    state: &AppState,
    domain: CacheDomain,
    params: QueryParams,
    handler: H,
) -> Result<Cached<Payload>>
where
    H: Fn(QueryParams) -> Fut,
    Fut: Future<Output = Result<Payload>>,
{
    let key_fn = move |params: &QueryParams| canonical_key(domain.as_str(), params);

    cached(state.caches.store(domain).clone(), key_fn, None, handler)
        .call(params)
        .await
}

// == Downstream Reads ==
async fn product_listing(catalog: SharedCatalog, params: QueryParams) -> Result<Payload> {
    let query = ListQuery::from_params(&params)?;
    let page = catalog.read().await.list(&query);
    Ok(Arc::new(serde_json::to_value(page)?))
}

async fn category_listing(catalog: SharedCatalog, _params: QueryParams) -> Result<Payload> {
    let categories = catalog.read().await.categories();
    Ok(Arc::new(serde_json::to_value(categories)?))
}

async fn search_listing(catalog: SharedCatalog, params: QueryParams) -> Result<Payload> {
    let query = SearchQuery::from_params(&params)?;
    let page = catalog.read().await.search(&query);
    Ok(Arc::new(serde_json::to_value(page)?))
}

/// Handler for GET /api/products
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Cached<Payload>> {
    let catalog = state.catalog.clone();
    serve_cached(&state, CacheDomain::Products, params, |p| {
        product_listing(catalog.clone(), p)
    })
    .await
}

/// Handler for GET /api/categories
pub async fn list_categories_handler(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Cached<Payload>> {
    let catalog = state.catalog.clone();
    serve_cached(&state, CacheDomain::Categories, params, |p| {
        category_listing(catalog.clone(), p)
    })
    .await
}

/// Handler for GET /api/search
pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Cached<Payload>> {
    let catalog = state.catalog.clone();
    serve_cached(&state, CacheDomain::Search, params, |p| {
        search_listing(catalog.clone(), p)
    })
    .await
}

/// Handler for GET /api/products/:id (uncached)
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Product>> {
    let catalog = state.catalog.read().await;
    Ok(Json(catalog.get(id)?.clone()))
}

// == Writes ==
/// Handler for POST /api/products
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.catalog.write().await.create(req)?;
    state.catalog_changed().await;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for PUT /api/products/:id
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    let product = state.catalog.write().await.update(id, req)?;
    state.catalog_changed().await;

    Ok(Json(product))
}

/// Handler for DELETE /api/products/:id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>> {
    state.catalog.write().await.delete(id)?;
    state.catalog_changed().await;

    Ok(Json(DeleteResponse::new(id)))
}

// == Cache Administration ==
/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse::new(state.caches.stats().await))
}

/// Handler for DELETE /api/cache/:domain
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    let domain: CacheDomain = domain.parse()?;
    let dropped = state.caches.invalidate(domain).await;

    Ok(Json(InvalidateResponse {
        domain: domain.as_str(),
        dropped,
    }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
