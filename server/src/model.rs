//! Domain types served by the catalog API.
//!
//! # Design
//! `Item` is the only stored entity. `NewItem` and `ItemPatch` are the
//! already-validated inputs the store accepts; raw JSON bodies are turned into
//! these by the `validation` module so the store never sees untyped data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A priced, categorized item held by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
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

/// Validated input for creating an item.
#[derive(Clone, Debug, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    pub category: String,
}

/// Validated partial update. `None` means the field was not provided.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

/// Conjunctive list filter. Price bounds are inclusive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(category) = &self.category {
            if &item.category != category {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if item.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if item.price > max {
                return false;
            }
        }
        true
    }
}

/// A third-party post reshaped for display next to the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExternalRecord {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub source: String,
}
