//! Request and Response models for the storefront API
//!
//! DTOs used for serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CreateProductRequest, UpdateProductRequest};
pub use responses::{
    CacheStatsResponse, DeleteResponse, DomainStats, HealthResponse, InvalidateResponse,
};
