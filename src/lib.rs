//! docstore - schema-less JSON document storage.
//!
//! Documents are JSON objects stored under random 128-bit identifiers with
//! creation and update timestamps. The store supports create, get, paginated
//! list, whole-body replace and idempotent delete. The `http` feature adds an
//! axum transport over the same operations.

pub mod clock;
pub mod config;
mod document;
mod error;
pub mod logging;
pub mod pagination;
pub mod service;
mod store;
pub mod uid;
pub mod validate;

pub use clock::{Clock, SystemClock};
pub use config::{ConfigError, ServiceConfig};
pub use document::{format_timestamp, Document, Record};
pub use error::{StoreError, StoreResult, ValidationError};
pub use logging::{default_log_filter, init_logging, logging_status};
pub use pagination::{paginate, slice_bounds, ListQuery, Page, PageInfo};
pub use service::{DocumentService, ListLimits, ServiceResponse};
pub use store::{DocumentStore, InMemoryDocumentStore};
pub use uid::{validate_format, RandomUidGenerator, Uid, UidGenerator};
pub use validate::{validate_create_body, validate_list_query, validate_replace_body};
