//! Request DTOs for the storefront API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

const MAX_NAME_LENGTH: usize = 200;

/// Request body for `POST /api/products`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub category: String,
    pub price_cents: u64,
    #[serde(default)]
    pub description: String,
}

impl CreateProductRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_name("name", &self.name).or_else(|| validate_name("category", &self.category))
    }
}

/// Request body for `PUT /api/products/:id`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price_cents: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Option<String> {
        if let Some(name) = &self.name {
            if let Some(err) = validate_name("name", name) {
                return Some(err);
            }
        }
        self.category
            .as_deref()
            .and_then(|category| validate_name("category", category))
    }
}

fn validate_name(field: &str, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{} cannot be empty", field));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Some(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_NAME_LENGTH
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{"name": "Oak Bowl", "category": "woodwork", "price_cents": 4500}"#;
        let req: CreateProductRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "Oak Bowl");
        assert_eq!(req.price_cents, 4500);
        assert!(req.description.is_empty());
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_empty_category() {
        let req = CreateProductRequest {
            name: "Bowl".to_string(),
            category: " ".to_string(),
            price_cents: 1,
            description: String::new(),
        };
        assert_eq!(req.validate(), Some("category cannot be empty".to_string()));
    }

    #[test]
    fn test_update_request_partial() {
        let req: UpdateProductRequest = serde_json::from_str(r#"{"price_cents": 10}"#).unwrap();
        assert_eq!(req.price_cents, Some(10));
        assert!(req.name.is_none());
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_update_request_rejects_long_name() {
        let req = UpdateProductRequest {
            name: Some("x".repeat(MAX_NAME_LENGTH + 1)),
            ..Default::default()
        };
        assert!(req.validate().is_some());
    }
}
