//! Cache Key Derivation
//!
//! Turns request query parameters into canonical cache keys.

use serde_json::json;

/// Raw query parameters in arrival order. Repeated names are allowed.
pub type QueryParams = Vec<(String, String)>;

/// Builds a cache key of the form `prefix:<params>`.
///
/// Parameters are sorted by name before serialization so that
/// `?sort=asc&page=1` and `?page=1&sort=asc` share one entry. The sort is
/// stable: values of a repeated name keep their relative order.
pub fn canonical_key(prefix: &str, params: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let pairs: Vec<_> = sorted.iter().map(|(k, v)| json!([k, v])).collect();
    format!("{}:{}", prefix, serde_json::Value::Array(pairs))
}
