//! Service façade - maps requests onto store operations.
//!
//! `DocumentService<S>` owns a store and turns raw request parts (body
//! bytes, path identifier, query strings) into `ServiceResponse` values with
//! HTTP-style status codes. It knows nothing about any HTTP framework; the
//! axum transport lives behind the `http` feature.
//!
//! ## Example
//!
//! ```
//! use docstore::service::DocumentService;
//! use docstore::InMemoryDocumentStore;
//!
//! let service = DocumentService::new(InMemoryDocumentStore::new());
//! let created = service.create(Some(br#"{"theme":"dark"}"#.as_slice()));
//! assert_eq!(created.status, 201);
//!
//! let uid = created.body.unwrap()["uid"].as_str().unwrap().to_string();
//! assert_eq!(service.get(&uid).status, 200);
//! assert_eq!(service.delete(&uid).status, 204);
//! assert_eq!(service.delete(&uid).status, 204);
//! ```

mod response;

#[cfg(feature = "http")]
pub mod http;

use std::time::Instant;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::document::{format_timestamp, Record};
use crate::error::StoreResult;
use crate::store::DocumentStore;
use crate::uid::Uid;
use crate::validate::{validate_create_body, validate_list_query, validate_replace_body};

pub use response::ServiceResponse;

/// Page-size bounds applied to list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for ListLimits {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl From<&ServiceConfig> for ListLimits {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            default_limit: config.default_limit,
            max_limit: config.max_limit,
        }
    }
}

/// Request-level entry point over a `DocumentStore`.
pub struct DocumentService<S> {
    store: S,
    limits: ListLimits,
    started: Instant,
}

impl<S: DocumentStore> DocumentService<S> {
    /// Create a service with default page-size bounds.
    pub fn new(store: S) -> Self {
        Self::with_limits(store, ListLimits::default())
    }

    pub fn with_limits(store: S, limits: ListLimits) -> Self {
        Self {
            store,
            limits,
            started: Instant::now(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn limits(&self) -> ListLimits {
        self.limits
    }

    /// Create a document from a raw body. 201 on success.
    pub fn create(&self, raw: Option<&[u8]>) -> ServiceResponse {
        respond("create", self.try_create(raw), ServiceResponse::created)
    }

    /// Fetch one document. 200 on success.
    pub fn get(&self, uid: &str) -> ServiceResponse {
        respond("get", self.store.get(uid).map(|r| r.render()), ServiceResponse::ok)
    }

    /// List documents as `{ items, pagination }`. 200 on success.
    pub fn list(&self, offset: Option<&str>, limit: Option<&str>) -> ServiceResponse {
        respond("list", self.try_list(offset, limit), ServiceResponse::ok)
    }

    /// Replace the whole body of one document. 200 on success.
    pub fn replace(&self, uid: &str, raw: Option<&[u8]>) -> ServiceResponse {
        respond("replace", self.try_replace(uid, raw), ServiceResponse::ok)
    }

    /// Delete one document. 204 whether or not it existed.
    pub fn delete(&self, uid: &str) -> ServiceResponse {
        respond("delete", self.store.delete(uid), |()| ServiceResponse::no_content())
    }

    /// Liveness probe. Does not touch the store.
    pub fn health(&self) -> ServiceResponse {
        ServiceResponse::ok(json!({
            "status": "healthy",
            "timestamp": format_timestamp(&Utc::now()),
            "uptime": self.started.elapsed().as_secs_f64(),
        }))
    }

    fn try_create(&self, raw: Option<&[u8]>) -> StoreResult<Value> {
        let body = validate_create_body(raw)?;
        Ok(self.store.create(body)?.render())
    }

    fn try_list(&self, offset: Option<&str>, limit: Option<&str>) -> StoreResult<Value> {
        let query = validate_list_query(
            offset,
            limit,
            self.limits.default_limit,
            self.limits.max_limit,
        )?;
        let page = self.store.list(query.offset, query.limit)?;
        Ok(json!({
            "items": page.items.iter().map(Record::render).collect::<Vec<_>>(),
            "pagination": page.pagination,
        }))
    }

    fn try_replace(&self, uid: &str, raw: Option<&[u8]>) -> StoreResult<Value> {
        // Malformed ids are reported ahead of body problems; the store takes the
        // raw id and parses it again.
        Uid::parse(uid)?;
        let body = validate_replace_body(raw)?;
        Ok(self.store.replace(uid, body)?.render())
    }
}

fn respond<T>(
    operation: &'static str,
    result: StoreResult<T>,
    on_success: impl FnOnce(T) -> ServiceResponse,
) -> ServiceResponse {
    match result {
        Ok(value) => on_success(value),
        Err(err) => {
            let response = ServiceResponse::from_error(&err);
            if response.status >= 500 {
                warn!(target: "docstore::service", operation, status = response.status, error = %err, "request failed");
            } else {
                debug!(target: "docstore::service", operation, status = response.status, error = %err, "request rejected");
            }
            response
        }
    }
}
