//! Request validation - turns raw request input into store-ready values.
//!
//! Runs before the store is touched: input that fails here can never create
//! or mutate a record. Missing bodies, malformed JSON, non-objects and `{}`
//! all surface as [`ValidationError`], which callers treat as one kind.

use std::num::IntErrorKind;

use serde_json::Value;

use crate::document::Document;
use crate::error::ValidationError;
use crate::pagination::ListQuery;

/// Validate the body of a create request.
pub fn validate_create_body(raw: Option<&[u8]>) -> Result<Document, ValidationError> {
    parse_document(raw)
}

/// Validate the body of a replace request. Same rules as create.
pub fn validate_replace_body(raw: Option<&[u8]>) -> Result<Document, ValidationError> {
    parse_document(raw)
}

fn parse_document(raw: Option<&[u8]>) -> Result<Document, ValidationError> {
    let bytes = match raw {
        Some(bytes) if !bytes.iter().all(u8::is_ascii_whitespace) => bytes,
        _ => return Err(ValidationError::MissingBody),
    };
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ValidationError::Parse(e.to_string()))?;
    Document::try_from_value(value)
}

/// Validate list query parameters.
///
/// Absent parameters fall back to `default_limit` and offset 0. A limit
/// above `max_limit` is clamped, not rejected.
pub fn validate_list_query(
    offset: Option<&str>,
    limit: Option<&str>,
    default_limit: usize,
    max_limit: usize,
) -> Result<ListQuery, ValidationError> {
    let offset = match offset {
        Some(raw) => parse_count("offset", raw)?,
        None => 0,
    };
    let limit = match limit {
        Some(raw) => parse_count("limit", raw)?.min(max_limit),
        None => default_limit.min(max_limit),
    };
    Ok(ListQuery { offset, limit })
}

/// Parse a non-negative count. Digit strings too large for `usize` saturate.
fn parse_count(param: &'static str, raw: &str) -> Result<usize, ValidationError> {
    match raw.trim().parse::<usize>() {
        Ok(count) => Ok(count),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(usize::MAX),
        Err(_) => Err(ValidationError::InvalidQuery {
            param,
            value: raw.to_string(),
        }),
    }
}
