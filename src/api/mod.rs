//! API Module
//!
//! HTTP handlers and routing for the storefront REST API.
//!
//! # Endpoints
//! - `GET /api/products`, `GET /api/categories`, `GET /api/search` - Cached reads
//! - `POST /api/products`, `PUT|DELETE /api/products/:id` - Writes that invalidate caches
//! - `GET /api/cache/stats`, `DELETE /api/cache/:domain` - Cache administration
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
