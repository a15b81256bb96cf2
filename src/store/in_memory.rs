//! InMemoryDocumentStore - HashMap-backed document store.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, SubsecRound, Utc};
use tracing::{debug, info, warn};

use super::DocumentStore;
use crate::clock::{Clock, SystemClock};
use crate::document::{Document, Record};
use crate::error::{StoreError, StoreResult};
use crate::pagination::{paginate, slice_bounds, Page};
use crate::uid::{RandomUidGenerator, Uid, UidGenerator};

const MAX_ID_DRAWS: usize = 16;

/// A live record and its position in insertion order.
struct Slot {
    seq: u64,
    record: Record,
}

#[derive(Default)]
struct State {
    records: HashMap<Uid, Slot>,
    /// Insertion sequence -> id. Iterating values gives the collection view.
    order: BTreeMap<u64, Uid>,
    /// Every id ever handed out, including deleted ones.
    issued: HashSet<Uid>,
    next_seq: u64,
}

/// In-memory document store.
///
/// One `RwLock` guards the whole mapping: `create`, `replace` and `delete`
/// take it exclusively, `get`, `list` and `count` share it. Clone-friendly
/// via Arc; clones see the same documents.
pub struct InMemoryDocumentStore<G = RandomUidGenerator, C = SystemClock> {
    state: Arc<RwLock<State>>,
    ids: Arc<G>,
    clock: Arc<C>,
}

impl<G, C> Clone for InMemoryDocumentStore<G, C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Create an empty store with random ids and wall-clock timestamps.
    pub fn new() -> Self {
        Self::with_parts(RandomUidGenerator, SystemClock)
    }
}

impl<G: UidGenerator, C: Clock> InMemoryDocumentStore<G, C> {
    /// Create an empty store with a custom id source and clock.
    pub fn with_parts(ids: G, clock: C) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            ids: Arc::new(ids),
            clock: Arc::new(clock),
        }
    }

    fn read(&self, operation: &'static str) -> StoreResult<RwLockReadGuard<'_, State>> {
        self.state.read().map_err(|_| {
            warn!(target: "docstore::store", operation, "store lock poisoned");
            StoreError::LockPoisoned(operation)
        })
    }

    fn write(&self, operation: &'static str) -> StoreResult<RwLockWriteGuard<'_, State>> {
        self.state.write().map_err(|_| {
            warn!(target: "docstore::store", operation, "store lock poisoned");
            StoreError::LockPoisoned(operation)
        })
    }

    /// Draw ids until one has never been issued by this store.
    fn fresh_id(&self, issued: &HashSet<Uid>) -> StoreResult<Uid> {
        for _ in 0..MAX_ID_DRAWS {
            let candidate = self.ids.generate();
            if !issued.contains(&candidate) {
                return Ok(candidate);
            }
            warn!(target: "docstore::store", uid = %candidate, "generator repeated an issued id");
        }
        Err(StoreError::IdentifierExhausted {
            attempts: MAX_ID_DRAWS,
        })
    }

    /// Clock reading at the precision records are rendered with.
    fn now(&self) -> DateTime<Utc> {
        self.clock.now().trunc_subsecs(6)
    }

    /// Next `updated_at` for a record last touched at `previous`.
    ///
    /// Strictly later than `previous` even when the clock has not advanced
    /// or has stepped backwards.
    fn next_update_time(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = self.now();
        if now > previous {
            now
        } else {
            previous + Duration::microseconds(1)
        }
    }
}

impl<G: UidGenerator, C: Clock> DocumentStore for InMemoryDocumentStore<G, C> {
    fn create(&self, body: Document) -> StoreResult<Record> {
        let mut state = self.write("create")?;

        let id = self.fresh_id(&state.issued)?;
        let now = self.now();
        let record = Record {
            id,
            body,
            created_at: now,
            updated_at: now,
        };

        let seq = state.next_seq;
        state.next_seq += 1;
        state.issued.insert(id);
        state.order.insert(seq, id);
        state.records.insert(
            id,
            Slot {
                seq,
                record: record.clone(),
            },
        );

        info!(target: "docstore::store", uid = %id, fields = record.body.len(), "document created");
        Ok(record)
    }

    fn get(&self, id: &str) -> StoreResult<Record> {
        let uid = Uid::parse(id)?;
        let state = self.read("get")?;

        match state.records.get(&uid) {
            Some(slot) => {
                debug!(target: "docstore::store", uid = %uid, "document read");
                Ok(slot.record.clone())
            }
            None => Err(StoreError::NotFound(uid)),
        }
    }

    fn list(&self, offset: usize, limit: usize) -> StoreResult<Page<Record>> {
        let state = self.read("list")?;

        let total = state.order.len();
        let range = slice_bounds(total, offset, limit);
        let items: Vec<Record> = state
            .order
            .values()
            .skip(range.start)
            .take(range.len())
            .filter_map(|id| state.records.get(id).map(|slot| slot.record.clone()))
            .collect();

        debug!(target: "docstore::store", total, offset, limit, returned = items.len(), "documents listed");
        Ok(Page {
            items,
            pagination: paginate(total, offset, limit),
        })
    }

    fn replace(&self, id: &str, body: Document) -> StoreResult<Record> {
        let uid = Uid::parse(id)?;
        let mut state = self.write("replace")?;

        let slot = state
            .records
            .get_mut(&uid)
            .ok_or(StoreError::NotFound(uid))?;
        slot.record.updated_at = self.next_update_time(slot.record.updated_at);
        slot.record.body = body;

        info!(target: "docstore::store", uid = %uid, fields = slot.record.body.len(), "document replaced");
        Ok(slot.record.clone())
    }

    fn remove(&self, id: &str) -> StoreResult<bool> {
        let uid = Uid::parse(id)?;
        let mut state = self.write("delete")?;

        let removed = match state.records.remove(&uid) {
            Some(slot) => {
                state.order.remove(&slot.seq);
                true
            }
            None => false,
        };

        info!(target: "docstore::store", uid = %uid, removed, "document deleted");
        Ok(removed)
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.read("count")?.records.len())
    }
}
