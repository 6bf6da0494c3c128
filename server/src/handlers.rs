//! HTTP handlers for the item resource and the external feed.
//!
//! Each handler returns either a success envelope or an `ItemError`, which
//! renders as the error envelope. Bodies are taken as raw JSON so that
//! malformed input is reported through the same envelope instead of axum's
//! plain-text rejection.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::envelope::Envelope;
use crate::error::{ItemError, ItemResult};
use crate::model::{ExternalRecord, Item};
use crate::validation::{parse_filter, parse_item_id, validate_new_item, validate_patch, ListQuery};
use crate::AppState;

type ItemResponse = ItemResult<Json<Envelope<Item>>>;

#[instrument(skip_all)]
pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, axum::extract::rejection::QueryRejection>,
) -> ItemResult<Json<Envelope<Vec<Item>>>> {
    let Query(query) = query.map_err(|e| ItemError::Validation(e.body_text()))?;
    let filter = parse_filter(query)?;
    let items = state.store.read().await.list(&filter);
    let total = items.len();
    Ok(Json(
        Envelope::ok(items, "Items retrieved successfully").with_total(total),
    ))
}

#[instrument(skip_all)]
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ItemResult<(StatusCode, Json<Envelope<Item>>)> {
    let Json(body) = body.map_err(|e| ItemError::Validation(e.body_text()))?;
    let input = validate_new_item(&body)?;
    let item = state.store.write().await.insert(input);
    info!(item_id = item.id, "Item created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(item, "Item created successfully")),
    ))
}

#[instrument(skip_all)]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ItemResponse {
    let id = parse_item_id(&id)?;

    let mut store = state.store.write().await;
    if store.get(id).is_none() {
        return Err(ItemError::NotFound(id.to_string()));
    }
    let Json(body) = body.map_err(|e| ItemError::Validation(e.body_text()))?;
    let patch = validate_patch(&body)?;
    let item = store
        .update(id, patch)
        .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
    info!(item_id = item.id, "Item updated");
    Ok(Json(Envelope::ok(item, "Item updated successfully")))
}

#[instrument(skip_all)]
pub async fn delete_item(State(state): State<AppState>, Path(id): Path<String>) -> ItemResponse {
    let id = parse_item_id(&id)?;
    let item = state
        .store
        .write()
        .await
        .remove(id)
        .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
    info!(item_id = item.id, "Item deleted");
    Ok(Json(Envelope::ok(item, "Item deleted successfully")))
}

#[instrument(skip_all)]
pub async fn external_records(
    State(state): State<AppState>,
) -> ItemResult<Json<Envelope<Vec<ExternalRecord>>>> {
    let records = state.external.fetch_records().await?;
    Ok(Json(Envelope::ok(
        records,
        "External data retrieved successfully",
    )))
}
