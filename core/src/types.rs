//! Wire types for the catalog API.
//!
//! # Design
//! Defined independently of the server crate so the client core carries no
//! axum or reqwest dependency. The integration tests run both crates against
//! each other and catch schema drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categories offered by the create form. The server accepts any text.
pub const SUGGESTED_CATEGORIES: [&str; 3] = ["electronics", "clothing", "books"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateItem {
    pub name: String,
    pub price: f64,
    pub category: String,
}

/// Partial update. Only fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Query filter for the list endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ItemFilter {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Default::default()
        }
    }

    pub fn min_price(min_price: f64) -> Self {
        Self {
            min_price: Some(min_price),
            ..Default::default()
        }
    }

    /// `key=value` pairs joined with `&`, or an empty string when no filter
    /// is set.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(min) = self.min_price {
            pairs.push(format!("minPrice={min}"));
        }
        if let Some(max) = self.max_price {
            pairs.push(format!("maxPrice={max}"));
        }
        pairs.join("&")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalRecord {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub source: String,
}

/// Response wrapper shared by every endpoint. Success responses carry
/// `data`; failures carry `error`. Missing fields decode as `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub total: Option<usize>,
    pub message: Option<String>,
    pub error: Option<String>,
}
