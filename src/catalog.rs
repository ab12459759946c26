//! Product Catalog
//!
//! In-memory product data source behind the storefront read and write
//! endpoints. Read operations are pure functions of their query.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::{AppError, Result};
use crate::models::{CreateProductRequest, UpdateProductRequest};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Catalog shared across handlers.
pub type SharedCatalog = Arc<RwLock<Catalog>>;

// == Product ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub price_cents: u64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// One page of products.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub product_count: usize,
}

// == Queries ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Newest,
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    fn parse(raw: &str) -> Result<Self> {
        match raw {
            "newest" => Ok(SortOrder::Newest),
            "name" => Ok(SortOrder::NameAsc),
            "-name" => Ok(SortOrder::NameDesc),
            "price" => Ok(SortOrder::PriceAsc),
            "-price" => Ok(SortOrder::PriceDesc),
            other => Err(AppError::InvalidRequest(format!(
                "Unknown sort order '{}'",
                other
            ))),
        }
    }
}

/// Paging shared by listing and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: usize,
    pub limit: usize,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub paging: Paging,
    pub sort: SortOrder,
    pub category: Option<String>,
}

impl ListQuery {
    /// Parses `page`, `limit`, `sort` and `category`. Unknown names are ignored.
    pub fn from_params(params: &[(String, String)]) -> Result<Self> {
        let mut sort = SortOrder::Newest;
        let mut category = None;
        for (name, value) in params {
            match name.as_str() {
                "sort" => sort = SortOrder::parse(value)?,
                "category" if !value.is_empty() => category = Some(value.clone()),
                _ => {}
            }
        }

        Ok(Self {
            paging: parse_paging(params)?,
            sort,
            category,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub paging: Paging,
}

impl SearchQuery {
    /// Parses the required `q` term plus paging.
    pub fn from_params(params: &[(String, String)]) -> Result<Self> {
        let term = params
            .iter()
            .find(|(name, _)| name == "q")
            .map(|(_, value)| value.trim().to_string())
            .filter(|term| !term.is_empty())
            .ok_or_else(|| AppError::InvalidRequest("Missing search term 'q'".to_string()))?;

        Ok(Self {
            term,
            paging: parse_paging(params)?,
        })
    }
}

fn parse_paging(params: &[(String, String)]) -> Result<Paging> {
    let mut paging = Paging::default();
    for (name, value) in params {
        match name.as_str() {
            "page" => paging.page = parse_positive(name, value)?,
            "limit" => {
                paging.limit = parse_positive(name, value)?;
                if paging.limit > MAX_PAGE_SIZE {
                    return Err(AppError::InvalidRequest(format!(
                        "limit must be at most {}",
                        MAX_PAGE_SIZE
                    )));
                }
            }
            _ => {}
        }
    }
    Ok(paging)
}

fn parse_positive(name: &str, value: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::InvalidRequest(format!("{} must be a positive integer", name)))
}

// == Catalog ==
#[derive(Debug, Default)]
pub struct Catalog {
    products: BTreeMap<u64, Product>,
    next_id: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            products: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn shared(self) -> SharedCatalog {
        Arc::new(RwLock::new(self))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: u64) -> Result<&Product> {
        self.products
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }

    pub fn list(&self, query: &ListQuery) -> ProductPage {
        let mut matching: Vec<&Product> = self
            .products
            .values()
            .filter(|p| {
                query
                    .category
                    .as_deref()
                    .map_or(true, |c| p.category.eq_ignore_ascii_case(c))
            })
            .collect();

        match query.sort {
            // Ids grow with insertion, so they break ties between equal timestamps
            SortOrder::Newest => matching.sort_by(|a, b| {
                b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id))
            }),
            SortOrder::NameAsc => matching.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::NameDesc => matching.sort_by(|a, b| b.name.cmp(&a.name)),
            SortOrder::PriceAsc => matching.sort_by_key(|p| p.price_cents),
            SortOrder::PriceDesc => matching.sort_by(|a, b| b.price_cents.cmp(&a.price_cents)),
        }

        paginate(matching, query.paging)
    }

    pub fn categories(&self) -> Vec<CategorySummary> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for product in self.products.values() {
            *counts.entry(product.category.as_str()).or_default() += 1;
        }

        let mut summaries: Vec<CategorySummary> = counts
            .into_iter()
            .map(|(name, product_count)| CategorySummary {
                name: name.to_string(),
                product_count,
            })
            .collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        summaries
    }

    /// Case-insensitive substring match on name, description and category.
    pub fn search(&self, query: &SearchQuery) -> ProductPage {
        let needle = query.term.to_lowercase();
        let matching: Vec<&Product> = self
            .products
            .values()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .collect();

        paginate(matching, query.paging)
    }

    pub fn create(&mut self, req: CreateProductRequest) -> Result<Product> {
        if let Some(msg) = req.validate() {
            return Err(AppError::InvalidRequest(msg));
        }

        let id = self.next_id.max(1);
        self.next_id = id + 1;
        let product = Product {
            id,
            name: req.name.trim().to_string(),
            category: req.category.trim().to_string(),
            price_cents: req.price_cents,
            description: req.description,
            created_at: Utc::now(),
        };
        self.products.insert(id, product.clone());
        Ok(product)
    }

    pub fn update(&mut self, id: u64, req: UpdateProductRequest) -> Result<Product> {
        if let Some(msg) = req.validate() {
            return Err(AppError::InvalidRequest(msg));
        }

        let product = self
            .products
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

        if let Some(name) = req.name {
            product.name = name.trim().to_string();
        }
        if let Some(category) = req.category {
            product.category = category.trim().to_string();
        }
        if let Some(price_cents) = req.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(description) = req.description {
            product.description = description;
        }
        Ok(product.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<Product> {
        self.products
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
    }
}

fn paginate(matching: Vec<&Product>, paging: Paging) -> ProductPage {
    let total = matching.len();
    let items = matching
        .into_iter()
        .skip((paging.page - 1).saturating_mul(paging.limit))
        .take(paging.limit)
        .cloned()
        .collect();

    ProductPage {
        items,
        total,
        page: paging.page,
        limit: paging.limit,
    }
}
