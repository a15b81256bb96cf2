//! Framework-agnostic response type for the document service.
//!
//! Bridges the store's typed results and whatever HTTP framework carries
//! them. The axum transport in `service::http` is one such consumer.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::StoreError;

/// Status code plus optional JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Response body. `None` for 204.
    pub body: Option<Value>,
}

impl ServiceResponse {
    /// 200 with a body.
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    /// 201 with the created resource.
    pub fn created(body: Value) -> Self {
        Self {
            status: 201,
            body: Some(body),
        }
    }

    /// 204, no body.
    pub fn no_content() -> Self {
        Self {
            status: 204,
            body: None,
        }
    }

    /// Build an error response: `{ "error": message }` with the mapped status.
    pub fn from_error(err: &StoreError) -> Self {
        Self {
            status: err.status_code(),
            body: Some(json!({ "error": err.to_string() })),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<StoreError> for ServiceResponse {
    fn from(err: StoreError) -> Self {
        Self::from_error(&err)
    }
}
