//! Table storage.

use core::sync::atomic::{AtomicU64, Ordering};

use alloc::sync::Arc;
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::sync::Mutex;

use super::TableSession;

/// Identifier assigned to a table by its store.
pub type TableId = u64;

/// A table behind its own lock.
pub type SharedSession = Arc<Mutex<TableSession>>;

/// Storage for live tables.
///
/// Every table sits behind its own mutex, so operations on different tables
/// never contend with each other.
pub trait TableStore {
    /// Stores a new table and returns its ID.
    fn insert(&self, session: TableSession) -> TableId;

    /// Returns a handle to a stored table.
    fn get(&self, id: TableId) -> Option<SharedSession>;

    /// Removes a table. Returns whether it existed.
    fn remove(&self, id: TableId) -> bool;

    /// Returns the IDs of all stored tables in ascending order.
    fn ids(&self) -> Vec<TableId>;
}

/// In-memory table store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    next_id: AtomicU64,
    tables: Mutex<HashMap<TableId, SharedSession>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.lock().len()
    }

    /// Returns whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.lock().is_empty()
    }
}

impl TableStore for MemoryStore {
    fn insert(&self, session: TableSession) -> TableId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.tables
            .lock()
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    fn get(&self, id: TableId) -> Option<SharedSession> {
        self.tables.lock().get(&id).cloned()
    }

    fn remove(&self, id: TableId) -> bool {
        self.tables.lock().remove(&id).is_some()
    }

    fn ids(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = self.tables.lock().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
