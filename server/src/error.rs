use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::envelope::ErrorEnvelope;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("{0}")]
    Validation(String),

    #[error("Item {0} not found")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl ItemError {
    pub fn status(&self) -> StatusCode {
        match self {
            ItemError::Validation(_) => StatusCode::BAD_REQUEST,
            ItemError::NotFound(_) => StatusCode::NOT_FOUND,
            ItemError::Internal(_) | ItemError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Internal and upstream details stay in the logs.
        let message = match &self {
            ItemError::Validation(msg) => {
                tracing::info!("Validation error: {}", msg);
                msg.clone()
            }
            ItemError::NotFound(id) => {
                tracing::warn!(item_id = %id, "Item not found");
                "Item not found".to_string()
            }
            ItemError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            ItemError::Upstream(msg) => {
                tracing::error!("Upstream error: {}", msg);
                "Failed to fetch external data".to_string()
            }
        };
        (status, Json(ErrorEnvelope::new(message))).into_response()
    }
}

/// Renders a caught handler panic as an internal error.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ItemError::Internal(format!("handler panicked: {detail}")).into_response()
}
