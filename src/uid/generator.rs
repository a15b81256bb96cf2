//! UidGenerator - source of fresh document identifiers.

use uuid::Uuid;

use super::Uid;

/// Produces fresh identifiers for new documents.
///
/// Implementations must draw from a source strong enough that repeats are
/// negligible. The store additionally refuses to reuse any id it has issued,
/// so a generator that does repeat costs a redraw, never an alias.
pub trait UidGenerator: Send + Sync {
    fn generate(&self) -> Uid;
}

/// Random (version 4) UUIDs backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUidGenerator;

impl UidGenerator for RandomUidGenerator {
    fn generate(&self) -> Uid {
        Uid::from(Uuid::new_v4())
    }
}

impl<G: UidGenerator + ?Sized> UidGenerator for std::sync::Arc<G> {
    fn generate(&self) -> Uid {
        (**self).generate()
    }
}
