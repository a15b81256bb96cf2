//! HTTP transport for the document service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health`: liveness probe.
//! - `GET /{collection}?offset=&limit=`: paginated list.
//! - `POST /{collection}`: create; 201 with the rendered record.
//! - `GET /{collection}/:uid`: fetch one.
//! - `PUT /{collection}/:uid`: whole-body replace.
//! - `DELETE /{collection}/:uid`: idempotent delete, always 204 for a
//!   well-formed uid.
//!
//! Bodies are taken as raw bytes so that a missing or malformed body is
//! answered by the service's own `{ "error": .. }` 400 rather than the
//! framework's rejection.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docstore::service::{http, DocumentService};
//! use docstore::InMemoryDocumentStore;
//!
//! let service = Arc::new(DocumentService::new(InMemoryDocumentStore::new()));
//! let app = http::router(service.clone(), "settings");
//! http::serve(service, "settings", "0.0.0.0:3000").await?;
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::info;

use super::{DocumentService, ServiceResponse};
use crate::store::DocumentStore;

type Shared<S> = State<Arc<DocumentService<S>>>;

impl IntoResponse for ServiceResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self.body {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        }
    }
}

/// Build an axum `Router` serving documents under `/{collection}`.
pub fn router<S: DocumentStore + 'static>(
    service: Arc<DocumentService<S>>,
    collection: &str,
) -> Router {
    let collection = collection.trim_matches('/');
    Router::new()
        .route("/health", get(health_handler::<S>))
        .route(
            &format!("/{collection}"),
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route(
            &format!("/{collection}/:uid"),
            get(get_handler::<S>)
                .put(replace_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .fallback(not_found_handler)
        .with_state(service)
}

/// Serve the document service over HTTP at `addr` until the process exits.
pub async fn serve<S: DocumentStore + 'static>(
    service: Arc<DocumentService<S>>,
    collection: &str,
    addr: &str,
) -> Result<(), std::io::Error> {
    serve_with_shutdown(service, collection, addr, std::future::pending()).await
}

/// Like [`serve`], stopping gracefully once `shutdown` resolves.
pub async fn serve_with_shutdown<S, F>(
    service: Arc<DocumentService<S>>,
    collection: &str,
    addr: &str,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    S: DocumentStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(service, collection);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(target: "docstore::http", addr = %listener.local_addr()?, collection, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// `GET /health`
async fn health_handler<S: DocumentStore>(State(service): Shared<S>) -> ServiceResponse {
    service.health()
}

/// `GET /{collection}`
async fn list_handler<S: DocumentStore>(
    State(service): Shared<S>,
    Query(params): Query<HashMap<String, String>>,
) -> ServiceResponse {
    service.list(
        params.get("offset").map(String::as_str),
        params.get("limit").map(String::as_str),
    )
}

/// `POST /{collection}`
async fn create_handler<S: DocumentStore>(
    State(service): Shared<S>,
    body: Bytes,
) -> ServiceResponse {
    service.create(Some(&body[..]))
}

/// `GET /{collection}/:uid`
async fn get_handler<S: DocumentStore>(
    State(service): Shared<S>,
    Path(uid): Path<String>,
) -> ServiceResponse {
    service.get(&uid)
}

/// `PUT /{collection}/:uid`
async fn replace_handler<S: DocumentStore>(
    State(service): Shared<S>,
    Path(uid): Path<String>,
    body: Bytes,
) -> ServiceResponse {
    service.replace(&uid, Some(&body[..]))
}

/// `DELETE /{collection}/:uid`
async fn delete_handler<S: DocumentStore>(
    State(service): Shared<S>,
    Path(uid): Path<String>,
) -> ServiceResponse {
    service.delete(&uid)
}

async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "route not found" })),
    )
}
