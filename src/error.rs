use thiserror::Error;

use crate::uid::Uid;

/// Input rejected before it reaches the store.
///
/// Every variant is surfaced to callers as the same kind (a 400 at the HTTP
/// boundary); the variants only differ in the message they carry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No request body, or a body made only of whitespace.
    #[error("request body is required")]
    MissingBody,
    /// The body is not well-formed JSON.
    #[error("invalid JSON body: {0}")]
    Parse(String),
    /// The body parsed, but its top level is not an object.
    #[error("document must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
    /// The body is `{}`.
    #[error("document must contain at least one field")]
    EmptyBody,
    /// A list query parameter is not a non-negative integer.
    #[error("invalid query parameter `{param}`: `{value}`")]
    InvalidQuery { param: &'static str, value: String },
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Empty, non-object, or syntactically malformed input.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// The identifier does not have the 8-4-4-4-12 hexadecimal shape.
    #[error("malformed identifier: `{0}`")]
    MalformedIdentifier(String),
    /// Well-formed identifier with no live record behind it.
    #[error("document not found: {0}")]
    NotFound(Uid),
    /// A durable backing could not serve the request.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// The generator kept returning identifiers the store already issued.
    #[error("no fresh identifier after {attempts} draws")]
    IdentifierExhausted { attempts: usize },
}

impl StoreError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Validation(_) => 400,
            StoreError::MalformedIdentifier(_) => 400,
            StoreError::NotFound(_) => 404,
            StoreError::StorageUnavailable(_) => 503,
            StoreError::LockPoisoned(_) => 500,
            StoreError::IdentifierExhausted { .. } => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
