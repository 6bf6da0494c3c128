//! Client-side state for the catalog page.
//!
//! # Design
//! `CatalogViewModel` is an explicit state machine. Every user action returns
//! the `HttpRequest`s it wants executed; every completed round-trip is fed
//! back through an `on_*` method, which updates state and may return a
//! follow-up request (a list refresh after a successful mutation). The host
//! decides how and when requests run. Requests returned together, such as
//! the two from `mount`, are independent and have no joint completion point.
//!
//! Nothing is retried and filter changes are not debounced.

use tracing::warn;

use crate::client::CatalogClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, RequestKind};
use crate::types::{CreateItem, ExternalRecord, Item, ItemFilter, UpdateItem, SUGGESTED_CATEGORIES};

/// Lifecycle of the item listing.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// One-shot message for the user, shown as a toast or dialog by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

/// Create form contents, kept as the raw text the user typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftForm {
    pub name: String,
    pub price: String,
    pub category: String,
}

impl DraftForm {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.price.is_empty() && self.category.is_empty()
    }

    fn to_create_item(&self) -> Result<CreateItem, ApiError> {
        let name = self.name.trim();
        let category = self.category.trim();
        let price = self.price.trim().parse::<f64>().ok().filter(|p| p.is_finite());

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("name");
        }
        if price.is_none() {
            missing.push("price");
        }
        if category.is_empty() {
            missing.push("category");
        }
        match price {
            Some(price) if missing.is_empty() => Ok(CreateItem {
                name: name.to_string(),
                price,
                category: category.to_string(),
            }),
            _ => Err(ApiError::InvalidDraft(missing.join(", "))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogViewModel {
    client: CatalogClient,
    items: Vec<Item>,
    external_records: Vec<ExternalRecord>,
    status: LoadState,
    draft: DraftForm,
    pending_delete: Option<u64>,
    notice: Option<Notice>,
}

impl CatalogViewModel {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            external_records: Vec::new(),
            status: LoadState::Idle,
            draft: DraftForm::default(),
            pending_delete: None,
            notice: None,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn external_records(&self) -> &[ExternalRecord] {
        &self.external_records
    }

    pub fn status(&self) -> &LoadState {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn draft(&self) -> &DraftForm {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DraftForm {
        &mut self.draft
    }

    /// Choices for the category select. Free text is still accepted.
    pub fn category_options(&self) -> &'static [&'static str] {
        &SUGGESTED_CATEGORIES
    }

    pub fn pending_delete(&self) -> Option<u64> {
        self.pending_delete
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Initial load: the listing and the external feed, fetched independently.
    pub fn mount(&mut self) -> Vec<HttpRequest> {
        vec![
            self.refresh(&ItemFilter::default()),
            self.client.build_external_records(),
        ]
    }

    pub fn refresh(&mut self, filter: &ItemFilter) -> HttpRequest {
        self.status = LoadState::Loading;
        self.client.build_list_items(filter)
    }

    pub fn on_list_response(&mut self, response: HttpResponse) {
        match self.client.parse_list_items(response) {
            Ok(page) => {
                self.items = page.items;
                self.status = LoadState::Loaded;
            }
            Err(e) => self.status = LoadState::Failed(e.to_string()),
        }
    }

    /// External failures are logged and otherwise ignored; the previous
    /// records stay on screen.
    pub fn on_external_response(&mut self, response: HttpResponse) {
        match self.client.parse_external_records(response) {
            Ok(records) => self.external_records = records,
            Err(e) => warn!(error = %e, "failed to load external records"),
        }
    }

    pub fn submit_draft(&mut self) -> Result<HttpRequest, ApiError> {
        let result = self
            .draft
            .to_create_item()
            .and_then(|input| self.client.build_create_item(&input));
        if let Err(e) = &result {
            self.notice = Some(Notice::Failure(e.to_string()));
        }
        result
    }

    /// On success the draft is cleared and a list refresh is returned.
    pub fn on_create_response(&mut self, response: HttpResponse) -> Option<HttpRequest> {
        match self.client.parse_create_item(response) {
            Ok(item) => {
                self.draft = DraftForm::default();
                self.notice = Some(Notice::Success(format!("Created \"{}\"", item.name)));
                Some(self.refresh(&ItemFilter::default()))
            }
            Err(e) => {
                self.notice = Some(Notice::Failure(e.to_string()));
                None
            }
        }
    }

    pub fn submit_update(&mut self, id: u64, update: &UpdateItem) -> Result<HttpRequest, ApiError> {
        let result = self.client.build_update_item(id, update);
        if let Err(e) = &result {
            self.notice = Some(Notice::Failure(e.to_string()));
        }
        result
    }

    pub fn on_update_response(&mut self, response: HttpResponse) -> Option<HttpRequest> {
        match self.client.parse_update_item(response) {
            Ok(item) => {
                self.notice = Some(Notice::Success(format!("Updated \"{}\"", item.name)));
                Some(self.refresh(&ItemFilter::default()))
            }
            Err(e) => {
                self.notice = Some(Notice::Failure(e.to_string()));
                None
            }
        }
    }

    /// Deleting needs confirmation: this only records the target.
    pub fn request_delete(&mut self, id: u64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) -> Option<HttpRequest> {
        self.pending_delete
            .take()
            .map(|id| self.client.build_delete_item(id))
    }

    pub fn on_delete_response(&mut self, response: HttpResponse) -> Option<HttpRequest> {
        match self.client.parse_delete_item(response) {
            Ok(item) => {
                self.notice = Some(Notice::Success(format!("Deleted \"{}\"", item.name)));
                Some(self.refresh(&ItemFilter::default()))
            }
            Err(e) => {
                self.notice = Some(Notice::Failure(e.to_string()));
                None
            }
        }
    }

    /// Routes a completed response by the kind of request that produced it.
    pub fn on_response(&mut self, kind: RequestKind, response: HttpResponse) -> Option<HttpRequest> {
        match kind {
            RequestKind::ListItems => {
                self.on_list_response(response);
                None
            }
            RequestKind::ExternalRecords => {
                self.on_external_response(response);
                None
            }
            RequestKind::CreateItem => self.on_create_response(response),
            RequestKind::UpdateItem => self.on_update_response(response),
            RequestKind::DeleteItem => self.on_delete_response(response),
        }
    }

    /// The host could not complete the round-trip at all.
    pub fn on_transport_error(&mut self, kind: RequestKind, message: &str) {
        match kind {
            RequestKind::ListItems => {
                self.status = LoadState::Failed(format!("Could not reach the API: {message}"));
            }
            RequestKind::ExternalRecords => {
                warn!(error = %message, "external records request failed");
            }
            RequestKind::CreateItem | RequestKind::UpdateItem | RequestKind::DeleteItem => {
                self.notice = Some(Notice::Failure(format!("Could not reach the API: {message}")));
            }
        }
    }
}
