//! Stateless request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method that
//! consumes the matching `HttpResponse`. The host runs the round-trip in
//! between, so nothing here blocks or touches the network.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestKind};
use crate::types::{CreateItem, Envelope, ExternalRecord, Item, ItemFilter, UpdateItem};

/// A decoded list response.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_items(&self, filter: &ItemFilter) -> HttpRequest {
        let query = filter.to_query_string();
        let url = if query.is_empty() {
            format!("{}/items", self.base_url)
        } else {
            format!("{}/items?{query}", self.base_url)
        };
        debug!(%url, "built list request");
        HttpRequest::without_body(RequestKind::ListItems, HttpMethod::Get, url)
    }

    pub fn build_create_item(&self, input: &CreateItem) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::with_json(
            RequestKind::CreateItem,
            HttpMethod::Post,
            format!("{}/items", self.base_url),
            body,
        ))
    }

    pub fn build_update_item(&self, id: u64, input: &UpdateItem) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::with_json(
            RequestKind::UpdateItem,
            HttpMethod::Put,
            format!("{}/items/{id}", self.base_url),
            body,
        ))
    }

    pub fn build_delete_item(&self, id: u64) -> HttpRequest {
        HttpRequest::without_body(
            RequestKind::DeleteItem,
            HttpMethod::Delete,
            format!("{}/items/{id}", self.base_url),
        )
    }

    pub fn build_external_records(&self) -> HttpRequest {
        HttpRequest::without_body(
            RequestKind::ExternalRecords,
            HttpMethod::Get,
            format!("{}/external", self.base_url),
        )
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<ItemPage, ApiError> {
        let envelope: Envelope<Vec<Item>> = decode(&response, 200)?;
        let total = envelope.total;
        let items = require_data(envelope)?;
        Ok(ItemPage {
            total: total.unwrap_or(items.len()),
            items,
        })
    }

    pub fn parse_create_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        require_data(decode(&response, 201)?)
    }

    pub fn parse_update_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        require_data(decode(&response, 200)?)
    }

    /// Returns the item the server removed.
    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        require_data(decode(&response, 200)?)
    }

    pub fn parse_external_records(&self, response: HttpResponse) -> Result<Vec<ExternalRecord>, ApiError> {
        require_data(decode(&response, 200)?)
    }
}

/// Map the status to an error or decode the success envelope.
fn decode<T: DeserializeOwned>(response: &HttpResponse, expected: u16) -> Result<Envelope<T>, ApiError> {
    if response.status != expected {
        let message = error_message(response);
        return Err(match response.status {
            400 => ApiError::Validation(message),
            404 => ApiError::NotFound(message),
            status => ApiError::Http { status, message },
        });
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn require_data<T>(envelope: Envelope<T>) -> Result<T, ApiError> {
    match envelope {
        Envelope {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        Envelope { error, .. } => Err(ApiError::Deserialization(
            error.unwrap_or_else(|| "envelope without data".to_string()),
        )),
    }
}

/// The server's `error` text, falling back to the raw body.
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_str::<Envelope<serde_json::Value>>(&response.body)
        .ok()
        .and_then(|envelope| envelope.error)
        .unwrap_or_else(|| response.body.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CatalogClient {
        CatalogClient::new("http://localhost:3500")
    }

    const ITEM_JSON: &str = r#"{"id":4,"name":"Lamp","price":25.5,"category":"electronics","createdAt":"2026-01-01T00:00:00Z"}"#;

    #[test]
    fn build_list_items_without_filter() {
        let req = client().build_list_items(&ItemFilter::default());
        assert_eq!(req.kind, RequestKind::ListItems);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3500/items");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_list_items_with_filter() {
        let req = client().build_list_items(&ItemFilter::min_price(150.0));
        assert_eq!(req.url, "http://localhost:3500/items?minPrice=150");
    }

    #[test]
    fn build_create_item_sends_json() {
        let input = CreateItem {
            name: "Lamp".to_string(),
            price: 25.5,
            category: "electronics".to_string(),
        };
        let req = client().build_create_item(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3500/items");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Lamp");
        assert_eq!(body["price"], 25.5);
    }

    #[test]
    fn build_update_and_delete_target_item_path() {
        let update = client()
            .build_update_item(
                7,
                &UpdateItem {
                    name: Some("New".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(update.method, HttpMethod::Put);
        assert_eq!(update.url, "http://localhost:3500/items/7");
        assert_eq!(update.body.as_deref(), Some(r#"{"name":"New"}"#));

        let delete = client().build_delete_item(7);
        assert_eq!(delete.method, HttpMethod::Delete);
        assert_eq!(delete.url, "http://localhost:3500/items/7");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CatalogClient::new("http://localhost:3500/");
        assert_eq!(client.base_url(), "http://localhost:3500");
        let req = client.build_external_records();
        assert_eq!(req.url, "http://localhost:3500/external");
    }

    #[test]
    fn parse_list_items_reads_total() {
        let body = format!(r#"{{"success":true,"data":[{ITEM_JSON}],"total":1,"message":"ok"}}"#);
        let page = client().parse_list_items(HttpResponse::new(200, body)).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Lamp");
        assert!(page.items[0].created_at.is_some());
    }

    #[test]
    fn parse_create_item_success() {
        let body = format!(r#"{{"success":true,"data":{ITEM_JSON},"message":"ok"}}"#);
        let item = client().parse_create_item(HttpResponse::new(201, body)).unwrap();
        assert_eq!(item.id, 4);
    }

    #[test]
    fn parse_create_item_validation_error() {
        let response = HttpResponse::new(
            400,
            r#"{"success":false,"error":"Missing required fields: category"}"#,
        );
        let err = client().parse_create_item(response).unwrap_err();
        assert_eq!(
            err,
            ApiError::Validation("Missing required fields: category".to_string())
        );
    }

    #[test]
    fn parse_delete_item_not_found() {
        let response = HttpResponse::new(404, r#"{"success":false,"error":"Item not found"}"#);
        let err = client().parse_delete_item(response).unwrap_err();
        assert_eq!(err, ApiError::NotFound("Item not found".to_string()));
    }

    #[test]
    fn parse_external_records_server_error_keeps_raw_body() {
        let response = HttpResponse::new(502, "bad gateway");
        let err = client().parse_external_records(response).unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 502,
                message: "bad gateway".to_string()
            }
        );
    }

    #[test]
    fn parse_list_items_bad_json() {
        let err = client()
            .parse_list_items(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_update_item_unsuccessful_envelope() {
        let response = HttpResponse::new(200, r#"{"success":false,"error":"odd"}"#);
        let err = client().parse_update_item(response).unwrap_err();
        assert_eq!(err, ApiError::Deserialization("odd".to_string()));
    }
}
