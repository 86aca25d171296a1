use super::SnapshotStore;
use crate::error::{Result, TodoError};
use crate::model::{Snapshot, UserId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory snapshot store for testing.
///
/// Slots hold serialized JSON rather than `Snapshot` values so tests can seed
/// damaged bytes and exercise the same parse path as `FileStore`.
#[derive(Default)]
pub struct InMemoryStore {
    slots: Mutex<HashMap<UserId, String>>,
    quarantined: Mutex<Vec<(UserId, String)>>,
    simulate_write_error: AtomicBool,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Seed a slot with raw bytes, bypassing serialization.
    pub fn put_raw(&self, user: &UserId, raw: impl Into<String>) {
        self.slots.lock().insert(user.clone(), raw.into());
    }

    pub fn raw(&self, user: &UserId) -> Option<String> {
        self.slots.lock().get(user).cloned()
    }

    pub fn quarantined(&self) -> Vec<(UserId, String)> {
        self.quarantined.lock().clone()
    }

    /// Number of `read` calls served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of successful `write` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for InMemoryStore {
    fn read(&self, user: &UserId) -> Result<Option<Snapshot>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let Some(raw) = self.raw(user) else {
            return Ok(None);
        };
        let snapshot = serde_json::from_str(&raw).map_err(|e| TodoError::CorruptSnapshot {
            user: user.clone(),
            reason: e.to_string(),
        })?;
        Ok(Some(snapshot))
    }

    fn write(&self, user: &UserId, snapshot: &Snapshot) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(TodoError::Store("Simulated write error".to_string()));
        }
        let raw = serde_json::to_string(snapshot).map_err(TodoError::Serialization)?;
        self.slots.lock().insert(user.clone(), raw);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn quarantine(&self, user: &UserId) -> Result<Option<PathBuf>> {
        let Some(raw) = self.slots.lock().remove(user) else {
            return Ok(None);
        };
        self.quarantined.lock().push((user.clone(), raw));
        Ok(Some(PathBuf::from(format!("memory://{}.corrupt", user))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, Todo, TodoId};

    #[test]
    fn missing_slot_reads_as_none() {
        let store = InMemoryStore::new();
        assert!(store.read(&UserId::new("nobody")).unwrap().is_none());
        assert_eq!(store.reads(), 1);
    }

    #[test]
    fn garbage_is_reported_as_corrupt() {
        let store = InMemoryStore::new();
        let user = UserId::new("u");
        store.put_raw(&user, "{not json");
        match store.read(&user) {
            Err(TodoError::CorruptSnapshot { user: u, .. }) => assert_eq!(u, user),
            other => panic!("Expected CorruptSnapshot, got {:?}", other),
        }
    }

    #[test]
    fn simulated_failure_leaves_previous_slot() {
        let store = InMemoryStore::new();
        let user = UserId::new("u");
        let mut snapshot = Snapshot::default();
        snapshot
            .todos
            .push(Todo::new(TodoId(1), "first", false, Priority::Low));
        snapshot.next_id = 2;
        store.write(&user, &snapshot).unwrap();

        store.set_simulate_write_error(true);
        assert!(store.write(&user, &Snapshot::default()).is_err());
        assert_eq!(store.read(&user).unwrap(), Some(snapshot));
        assert_eq!(store.writes(), 1);
    }
}
