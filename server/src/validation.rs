//! Boundary checks that turn raw request data into typed inputs.
//!
//! Create bodies must carry `name`, `price` and `category`; update bodies may
//! carry any subset. A field counts as provided when it is present and not
//! `null`. `price` is accepted as a JSON number or as numeric text.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ItemError, ItemResult};
use crate::model::{ItemFilter, ItemPatch, NewItem};

const REQUIRED_FIELDS: [&str; 3] = ["name", "price", "category"];

/// Raw list query parameters, exactly as they arrive on the URL.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

pub fn validate_new_item(body: &Value) -> ItemResult<NewItem> {
    let fields = as_object(body)?;

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|key| is_missing(fields.get(*key)))
        .collect();
    if !missing.is_empty() {
        return Err(ItemError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let name = text_field(&fields["name"]);
    let price = price_field(&fields["price"]);
    let category = text_field(&fields["category"]);

    match (name, price, category) {
        (Some(name), Some(price), Some(category)) => Ok(NewItem {
            name,
            price,
            category,
        }),
        (name, price, category) => {
            let invalid = invalid_fields(name.is_none(), price.is_none(), category.is_none());
            Err(ItemError::Validation(format!(
                "Invalid field types: {}",
                invalid.join(", ")
            )))
        }
    }
}

pub fn validate_patch(body: &Value) -> ItemResult<ItemPatch> {
    let fields = as_object(body)?;
    let provided = |key: &str| fields.get(key).filter(|v| !v.is_null());

    let name = provided("name").map(text_field);
    let price = provided("price").map(price_field);
    let category = provided("category").map(text_field);

    let invalid = invalid_fields(
        matches!(name, Some(None)),
        matches!(price, Some(None)),
        matches!(category, Some(None)),
    );
    if !invalid.is_empty() {
        return Err(ItemError::Validation(format!(
            "Invalid field types: {}",
            invalid.join(", ")
        )));
    }

    Ok(ItemPatch {
        name: name.flatten(),
        price: price.flatten(),
        category: category.flatten(),
    })
}

/// Empty values are treated as absent. Unparseable bounds are rejected.
pub fn parse_filter(query: ListQuery) -> ItemResult<ItemFilter> {
    Ok(ItemFilter {
        category: query.category.filter(|c| !c.is_empty()),
        min_price: parse_bound("minPrice", query.min_price)?,
        max_price: parse_bound("maxPrice", query.max_price)?,
    })
}

/// Parses an item id taken from the URL path. Anything that is not a
/// positive integer cannot name an item.
pub fn parse_item_id(raw: &str) -> ItemResult<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ItemError::NotFound(raw.to_string()))
}

fn as_object(body: &Value) -> ItemResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| ItemError::Validation("Request body must be a JSON object".to_string()))
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn text_field(value: &Value) -> Option<String> {
    value.as_str().filter(|s| !s.is_empty()).map(str::to_string)
}

fn price_field(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    price.is_finite().then_some(price)
}

fn parse_bound(key: &str, raw: Option<String>) -> ItemResult<Option<f64>> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| ItemError::Validation(format!("Invalid numeric value for {key}: {text}"))),
    }
}

fn invalid_fields(name: bool, price: bool, category: bool) -> Vec<&'static str> {
    [("name", name), ("price", price), ("category", category)]
        .into_iter()
        .filter_map(|(field, invalid)| invalid.then_some(field))
        .collect()
}
