//! In-memory catalog API.
//!
//! # Overview
//! Serves a small collection of priced, categorized items over HTTP with
//! list/create/update/delete endpoints, plus an `/external` endpoint that
//! reshapes posts fetched from a third-party service. Every response is a
//! JSON envelope: `{success, data, total?, message}` on success and
//! `{success: false, error}` otherwise.
//!
//! # Design
//! - One `ItemStore` per process, shared behind a single `RwLock`. Every
//!   mutation runs to completion under the write lock.
//! - Raw request data is validated into typed inputs (`validation`) before
//!   the store is touched.
//! - Errors are an `ItemError` enum that renders the error envelope.

pub mod config;
pub mod envelope;
pub mod error;
pub mod external;
pub mod handlers;
pub mod model;
pub mod store;
pub mod telemetry;
pub mod validation;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub use config::{Environment, FromEnv, ServerConfig};
pub use envelope::{Envelope, ErrorEnvelope};
pub use error::ItemError;
pub use external::ExternalFeed;
pub use model::{ExternalRecord, Item};
pub use store::ItemStore;

pub type SharedStore = Arc<RwLock<ItemStore>>;

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: SharedStore,
    pub external: ExternalFeed,
}

impl AppState {
    pub fn new(store: ItemStore, external: ExternalFeed) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            external,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let store = if config.seed_demo_items {
            ItemStore::with_demo_items()
        } else {
            ItemStore::new()
        };
        Self::new(store, ExternalFeed::new(config.external_posts_url.clone()))
    }
}

pub fn app(state: AppState) -> Router {
    let routes = Router::new()
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/items/{id}",
            axum::routing::put(handlers::update_item).delete(handlers::delete_item),
        )
        .route("/external", get(handlers::external_records));
    with_middleware(routes).with_state(state)
}

/// Panic recovery, request tracing and CORS. A panicking handler answers
/// with the 500 error envelope instead of dropping the connection.
pub fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}
