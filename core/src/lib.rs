//! I/O-free client core for the catalog API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the page state for
//! a catalog UI in `CatalogViewModel`.
//!
//! # Design
//! - `CatalogClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*` so the I/O boundary
//!   is explicit.
//! - `CatalogViewModel` owns UI state and turns user actions and completed
//!   responses into state transitions plus follow-up requests.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod view_model;

pub use client::{CatalogClient, ItemPage};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestKind};
pub use types::{CreateItem, ExternalRecord, Item, ItemFilter, UpdateItem, SUGGESTED_CATEGORIES};
pub use view_model::{CatalogViewModel, DraftForm, LoadState, Notice};
