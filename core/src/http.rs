//! Plain-data HTTP request and response values.
//!
//! The core never performs I/O. It hands `HttpRequest` values to the host,
//! the host executes them with whatever HTTP stack it has, and the results
//! come back as `HttpResponse` values.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// What an `HttpRequest` is for, so the host can route the response back to
/// the matching `on_*_response` handler of the view model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    ListItems,
    CreateItem,
    UpdateItem,
    DeleteItem,
    ExternalRecords,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub kind: RequestKind,
    pub method: HttpMethod,
    /// Absolute URL including any query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub(crate) fn without_body(kind: RequestKind, method: HttpMethod, url: String) -> Self {
        Self {
            kind,
            method,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn with_json(kind: RequestKind, method: HttpMethod, url: String, body: String) -> Self {
        Self {
            kind,
            method,
            url,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}
