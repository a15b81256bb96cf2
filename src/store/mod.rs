//! Document stores - the identifier to record mapping.
//!
//! [`DocumentStore`] is the contract a backing must honor; the crate ships
//! [`InMemoryDocumentStore`]. A durable backing reports its own I/O
//! failures as `StoreError::StorageUnavailable`.
//!
//! ## Example
//!
//! ```
//! use docstore::{Document, DocumentStore, InMemoryDocumentStore};
//! use serde_json::json;
//!
//! let store = InMemoryDocumentStore::new();
//! let body = Document::try_from_value(json!({ "theme": "dark" })).unwrap();
//! let record = store.create(body).unwrap();
//!
//! let loaded = store.get(&record.id.to_string()).unwrap();
//! assert_eq!(loaded.body, record.body);
//!
//! store.delete(&record.id.to_string()).unwrap();
//! store.delete(&record.id.to_string()).unwrap();
//! ```

mod in_memory;

use std::sync::Arc;

use crate::document::{Document, Record};
use crate::error::StoreResult;
use crate::pagination::Page;

pub use in_memory::InMemoryDocumentStore;

/// CRUD and listing over schema-less documents.
///
/// Identifiers arrive as raw strings: implementations reject strings that
/// fail [`crate::uid::validate_format`] with `MalformedIdentifier` before
/// looking anything up.
pub trait DocumentStore: Send + Sync {
    /// Insert a new document under a fresh identifier.
    fn create(&self, body: Document) -> StoreResult<Record>;

    /// Fetch the current record for `id`.
    fn get(&self, id: &str) -> StoreResult<Record>;

    /// Insertion-ordered slice starting at `offset`, at most `limit` long.
    ///
    /// The page metadata is computed from the same total the slice was cut
    /// from.
    fn list(&self, offset: usize, limit: usize) -> StoreResult<Page<Record>>;

    /// Overwrite the whole body of `id`, keeping `created_at`.
    fn replace(&self, id: &str, body: Document) -> StoreResult<Record>;

    /// Remove `id` if present. Returns whether a record was removed.
    fn remove(&self, id: &str) -> StoreResult<bool>;

    /// Idempotent delete: succeeds whether or not `id` was present.
    fn delete(&self, id: &str) -> StoreResult<()> {
        self.remove(id).map(|_| ())
    }

    /// Number of live records.
    fn count(&self) -> StoreResult<usize>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn create(&self, body: Document) -> StoreResult<Record> {
        (**self).create(body)
    }

    fn get(&self, id: &str) -> StoreResult<Record> {
        (**self).get(id)
    }

    fn list(&self, offset: usize, limit: usize) -> StoreResult<Page<Record>> {
        (**self).list(offset, limit)
    }

    fn replace(&self, id: &str, body: Document) -> StoreResult<Record> {
        (**self).replace(id, body)
    }

    fn remove(&self, id: &str) -> StoreResult<bool> {
        (**self).remove(id)
    }

    fn delete(&self, id: &str) -> StoreResult<()> {
        (**self).delete(id)
    }

    fn count(&self) -> StoreResult<usize> {
        (**self).count()
    }
}
