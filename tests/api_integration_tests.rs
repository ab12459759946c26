//! Integration Tests for API Endpoints
//!
//! Drives the full router: cached reads, the X-Cache header, invalidation on
//! writes and the cache administration endpoints.

use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use storefront_cache::{
    api::create_router, catalog::Catalog, config::CacheSettings, AppState, CacheDomain,
    CacheRegistry, Config,
};
use tower::ServiceExt;

// == Helper Functions ==

fn test_state() -> AppState {
    AppState::from_config(&Config::default())
}

fn short_lived_state(ttl_secs: u64) -> AppState {
    let settings = CacheSettings::new(10, ttl_secs);
    AppState::new(Catalog::new(), CacheRegistry::new(settings, settings, settings))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn get(app: &Router, uri: &str) -> Response {
    send(app, "GET", uri, None).await
}

fn cache_status(response: &Response) -> &str {
    response.headers()["x-cache"].to_str().unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_to_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn create_product(app: &Router, name: &str, category: &str, price_cents: u64) -> Value {
    let body = format!(
        r#"{{"name":"{}","category":"{}","price_cents":{}}}"#,
        name, category, price_cents
    );
    let response = send(app, "POST", "/api/products", Some(&body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_to_json(response).await
}

// == Cached Reads ==

#[tokio::test]
async fn test_listing_miss_then_hit_with_identical_body() {
    let app = create_router(test_state());
    create_product(&app, "Oak Bowl", "woodwork", 4500).await;

    let first = get(&app, "/api/products?page=1").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(cache_status(&first), "MISS");
    let first_body = body_bytes(first).await;

    let second = get(&app, "/api/products?page=1").await;
    assert_eq!(cache_status(&second), "HIT");
    assert_eq!(body_bytes(second).await, first_body);
}

#[tokio::test]
async fn test_reordered_query_hits_same_entry() {
    let app = create_router(test_state());

    let first = get(&app, "/api/products?sort=name&page=1").await;
    let second = get(&app, "/api/products?page=1&sort=name").await;

    assert_eq!(cache_status(&first), "MISS");
    assert_eq!(cache_status(&second), "HIT");
}

#[tokio::test]
async fn test_different_queries_are_cached_separately() {
    let app = create_router(test_state());

    assert_eq!(cache_status(&get(&app, "/api/products?page=1").await), "MISS");
    assert_eq!(cache_status(&get(&app, "/api/products?page=2").await), "MISS");
    assert_eq!(cache_status(&get(&app, "/api/products?page=1").await), "HIT");
}

#[tokio::test]
async fn test_entry_expires_after_ttl() {
    let app = create_router(short_lived_state(1));

    assert_eq!(cache_status(&get(&app, "/api/categories").await), "MISS");
    assert_eq!(cache_status(&get(&app, "/api/categories").await), "HIT");

    tokio::time::sleep(Duration::from_millis(1100)).await;

    assert_eq!(cache_status(&get(&app, "/api/categories").await), "MISS");
}

#[tokio::test]
async fn test_search_results_are_cached() {
    let app = create_router(test_state());
    create_product(&app, "Walnut Spoon", "woodwork", 1200).await;
    create_product(&app, "Clay Mug", "ceramics", 1800).await;

    let first = get(&app, "/api/search?q=walnut").await;
    assert_eq!(cache_status(&first), "MISS");
    let json = body_to_json(first).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["name"], "Walnut Spoon");

    assert_eq!(cache_status(&get(&app, "/api/search?q=walnut").await), "HIT");
}

#[tokio::test]
async fn test_invalid_query_is_rejected_and_not_cached() {
    let state = test_state();
    let app = create_router(state.clone());

    let response = get(&app, "/api/search").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get("x-cache").is_none());
    let json = body_to_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("q"));

    assert!(state.caches.store(CacheDomain::Search).read().await.is_empty());
}

// == Invalidation ==

#[tokio::test]
async fn test_create_invalidates_every_domain() {
    let app = create_router(test_state());

    get(&app, "/api/products").await;
    get(&app, "/api/categories").await;
    get(&app, "/api/search?q=bowl").await;

    create_product(&app, "Oak Bowl", "woodwork", 4500).await;

    let listing = get(&app, "/api/products").await;
    assert_eq!(cache_status(&listing), "MISS");
    assert_eq!(body_to_json(listing).await["total"], 1);

    let categories = get(&app, "/api/categories").await;
    assert_eq!(cache_status(&categories), "MISS");
    assert_eq!(body_to_json(categories).await[0]["product_count"], 1);

    assert_eq!(cache_status(&get(&app, "/api/search?q=bowl").await), "MISS");
}

#[tokio::test]
async fn test_update_and_delete_invalidate() {
    let app = create_router(test_state());
    let product = create_product(&app, "Oak Bowl", "woodwork", 4500).await;
    let uri = format!("/api/products/{}", product["id"]);

    get(&app, "/api/products").await;
    let response = send(&app, "PUT", &uri, Some(r#"{"price_cents":5000}"#)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listing = get(&app, "/api/products").await;
    assert_eq!(cache_status(&listing), "MISS");
    assert_eq!(body_to_json(listing).await["items"][0]["price_cents"], 5000);

    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listing = get(&app, "/api/products").await;
    assert_eq!(cache_status(&listing), "MISS");
    assert_eq!(body_to_json(listing).await["total"], 0);
}

#[tokio::test]
async fn test_failed_write_keeps_cache() {
    let app = create_router(test_state());
    get(&app, "/api/products").await;

    let response = send(&app, "DELETE", "/api/products/99", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(cache_status(&get(&app, "/api/products").await), "HIT");
}

#[tokio::test]
async fn test_manual_invalidation_endpoint() {
    let app = create_router(test_state());
    get(&app, "/api/categories").await;
    get(&app, "/api/products").await;

    let response = send(&app, "DELETE", "/api/cache/categories", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["domain"], "categories");
    assert_eq!(json["dropped"], 1);

    assert_eq!(cache_status(&get(&app, "/api/categories").await), "MISS");
    assert_eq!(cache_status(&get(&app, "/api/products").await), "HIT");

    let response = send(&app, "DELETE", "/api/cache/orders", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Stats & Health ==

#[tokio::test]
async fn test_cache_stats_endpoint() {
    let app = create_router(test_state());
    get(&app, "/api/products").await;
    get(&app, "/api/products").await;

    let response = get(&app, "/api/cache/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;

    let caches = json["caches"].as_array().unwrap();
    assert_eq!(caches.len(), 3);
    let products = caches
        .iter()
        .find(|c| c["domain"] == "products")
        .unwrap();
    assert_eq!(products["hits"], 1);
    assert_eq!(products["misses"], 1);
    assert_eq!(products["sets"], 1);
    assert_eq!(products["size"], 1);
    assert_eq!(products["max_size"], 100);
    assert_eq!(products["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(test_state());

    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response).await["status"], "healthy");
}

#[test]
fn test_registry_built_from_config() {
    let registry = CacheRegistry::from_config(&Config::default());

    let stats = tokio_test::block_on(registry.stats());

    let sizes: Vec<_> = stats.iter().map(|(d, s)| (*d, s.max_size)).collect();
    assert_eq!(
        sizes,
        vec![
            (CacheDomain::Products, 100),
            (CacheDomain::Categories, 50),
            (CacheDomain::Search, 50),
        ]
    );
}
