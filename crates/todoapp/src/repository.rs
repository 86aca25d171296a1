//! # Todo Repository
//!
//! [`TodoRepository`] is the single mutation authority for every user's todos.
//! It owns the cache, allocates ids, and writes through to a [`SnapshotStore`]
//! after each mutation.
//!
//! ## Resolution
//!
//! Every operation first resolves the caller's state:
//! 1. **Cache hit**: use the cached snapshot.
//! 2. **Cold load**: read the durable slot once, repair a stale `nextId`, cache it.
//! 3. **Fresh**: no slot, or an unreadable one, starts empty with `nextId = 1`.
//!    An unreadable slot is quarantined first.
//!
//! After that the durable copy is never read again in this process.
//!
//! ## Locking
//!
//! ```text
//! cache: RwLock<HashMap<UserId, Arc<Mutex<Option<Snapshot>>>>>
//!        └─ map lock: held only to find or insert an entry
//!                      └─ per-user lock: resolve, mutate, persist
//! ```
//!
//! Operations on one user are serialized by that user's mutex, reads included,
//! so no caller ever sees half a mutation and two creates can never allocate
//! the same id. Cold loads happen under the per-user mutex, never under the
//! map lock, so users do not wait on each other's disk reads.
//!
//! ## Durability
//!
//! Mutations persist synchronously inside the per-user critical section, so
//! durable writes for one user land in mutation order. A failed write is logged
//! and reported as [`Durability::MemoryOnly`]; the in-memory change stands.

use crate::commands::{self, ListQuery, TodoStats};
use crate::error::{Result, TodoError};
use crate::model::{NewTodo, Snapshot, Todo, TodoId, TodoPatch, UserId};
use crate::store::SnapshotStore;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Whether a committed mutation reached the durable store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    Persisted,
    /// The write failed; the change lives only in this process's cache.
    MemoryOnly,
}

impl Durability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Durability::Persisted => "persisted",
            Durability::MemoryOnly => "memory-only",
        }
    }
}

/// The result of a mutation together with its durability outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed<T> {
    pub value: T,
    pub durability: Durability,
}

impl<T> Committed<T> {
    pub fn is_persisted(&self) -> bool {
        self.durability == Durability::Persisted
    }
}

type UserSlot = Arc<Mutex<Option<Snapshot>>>;

pub struct TodoRepository<S: SnapshotStore> {
    store: S,
    cache: RwLock<HashMap<UserId, UserSlot>>,
}

impl<S: SnapshotStore> TodoRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn list(&self, user: &UserId, query: &ListQuery) -> Vec<Todo> {
        self.with_snapshot(user, |snapshot| commands::list::run(snapshot, query))
    }

    pub fn get(&self, user: &UserId, id: TodoId) -> Result<Todo> {
        self.with_snapshot(user, |snapshot| commands::get::run(snapshot, id))
    }

    pub fn stats(&self, user: &UserId) -> TodoStats {
        self.with_snapshot(user, |snapshot| commands::stats::run(snapshot))
    }

    pub fn create(&self, user: &UserId, new: NewTodo) -> Committed<Todo> {
        self.with_snapshot(user, |snapshot| {
            let todo = commands::create::run(snapshot, new);
            tracing::debug!(user = %user, id = %todo.id, "todo created");
            self.commit(user, snapshot, todo)
        })
    }

    pub fn update(&self, user: &UserId, id: TodoId, patch: &TodoPatch) -> Result<Committed<Todo>> {
        self.with_snapshot(user, |snapshot| {
            let todo = commands::update::run(snapshot, id, patch)?;
            if patch.is_empty() {
                return Ok(Committed {
                    value: todo,
                    durability: Durability::Persisted,
                });
            }
            Ok(self.commit(user, snapshot, todo))
        })
    }

    pub fn delete(&self, user: &UserId, id: TodoId) -> Result<Committed<Todo>> {
        self.with_snapshot(user, |snapshot| {
            let todo = commands::delete::run(snapshot, id)?;
            tracing::debug!(user = %user, id = %id, "todo deleted");
            Ok(self.commit(user, snapshot, todo))
        })
    }

    /// Removes every completed todo for `user` in one mutation.
    pub fn clear_completed(&self, user: &UserId) -> Committed<Vec<Todo>> {
        self.with_snapshot(user, |snapshot| {
            let removed = commands::clear::run(snapshot);
            if removed.is_empty() {
                return Committed {
                    value: removed,
                    durability: Durability::Persisted,
                };
            }
            self.commit(user, snapshot, removed)
        })
    }

    /// Number of users resolved so far in this process.
    pub fn cached_users(&self) -> usize {
        self.cache.read().len()
    }

    /// Runs `f` on the user's resolved snapshot while holding that user's lock.
    fn with_snapshot<R>(&self, user: &UserId, f: impl FnOnce(&mut Snapshot) -> R) -> R {
        let slot = self.slot(user);
        let mut guard = slot.lock();
        let snapshot = guard.get_or_insert_with(|| self.hydrate(user));
        f(snapshot)
    }

    fn slot(&self, user: &UserId) -> UserSlot {
        if let Some(slot) = self.cache.read().get(user) {
            return Arc::clone(slot);
        }
        let mut cache = self.cache.write();
        Arc::clone(cache.entry(user.clone()).or_default())
    }

    fn hydrate(&self, user: &UserId) -> Snapshot {
        match self.store.read(user) {
            Ok(Some(mut snapshot)) => {
                let stale = snapshot.next_id;
                if snapshot.repair_next_id() {
                    tracing::warn!(
                        user = %user,
                        stored = stale,
                        repaired = snapshot.next_id,
                        "stored nextId was not above every id; raised it"
                    );
                }
                tracing::debug!(user = %user, todos = snapshot.todos.len(), "snapshot loaded");
                snapshot
            }
            Ok(None) => {
                tracing::debug!(user = %user, "no snapshot, starting empty");
                Snapshot::default()
            }
            Err(err @ TodoError::CorruptSnapshot { .. }) => {
                tracing::warn!(user = %user, error = %err, "unreadable snapshot, starting empty");
                match self.store.quarantine(user) {
                    Ok(Some(aside)) => {
                        tracing::warn!(user = %user, path = %aside.display(), "corrupt snapshot moved aside")
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!(user = %user, error = %e, "failed to quarantine corrupt snapshot")
                    }
                }
                Snapshot::default()
            }
            Err(err) => {
                tracing::error!(user = %user, error = %err, "snapshot read failed, starting empty");
                Snapshot::default()
            }
        }
    }

    fn commit<T>(&self, user: &UserId, snapshot: &Snapshot, value: T) -> Committed<T> {
        let durability = match self.store.write(user, snapshot) {
            Ok(()) => Durability::Persisted,
            Err(err) => {
                tracing::error!(user = %user, error = %err, "persist failed, change kept in memory only");
                Durability::MemoryOnly
            }
        };
        Committed { value, durability }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::StatusFilter;
    use crate::model::Priority;
    use crate::store::memory::InMemoryStore;

    fn repo() -> TodoRepository<InMemoryStore> {
        TodoRepository::new(InMemoryStore::new())
    }

    #[test]
    fn create_persists_full_snapshot() {
        let repo = repo();
        let user = UserId::new("alice");
        let created = repo.create(&user, NewTodo::new("  Buy milk "));

        assert!(created.is_persisted());
        assert_eq!(created.value.title, "Buy milk");
        let stored = repo.store().read(&user).unwrap().unwrap();
        assert_eq!(stored.todos, vec![created.value]);
        assert_eq!(stored.next_id, 2);
    }

    #[test]
    fn durable_slot_is_read_once_per_user() {
        let repo = repo();
        let user = UserId::new("alice");
        repo.create(&user, NewTodo::new("a"));
        repo.list(&user, &ListQuery::all());
        repo.stats(&user);
        assert_eq!(repo.store().reads(), 1);

        repo.list(&UserId::new("bob"), &ListQuery::all());
        assert_eq!(repo.store().reads(), 2);
        assert_eq!(repo.cached_users(), 2);
    }

    #[test]
    fn update_not_found_does_not_write() {
        let repo = repo();
        let user = UserId::new("alice");
        repo.create(&user, NewTodo::new("a"));
        let writes = repo.store().writes();

        let result = repo.update(&user, TodoId(99), &TodoPatch::default().completed(true));
        assert!(matches!(result, Err(TodoError::NotFound(TodoId(99)))));
        assert_eq!(repo.store().writes(), writes);
    }

    #[test]
    fn empty_patch_returns_todo_without_writing() {
        let repo = repo();
        let user = UserId::new("alice");
        let created = repo.create(&user, NewTodo::new("unchanged")).value;
        let writes = repo.store().writes();

        let committed = repo.update(&user, created.id, &TodoPatch::default()).unwrap();
        assert_eq!(committed.value, created);
        assert!(committed.is_persisted());
        assert_eq!(repo.store().writes(), writes);

        assert!(repo.update(&user, TodoId(99), &TodoPatch::default()).unwrap_err().is_not_found());
    }

    #[test]
    fn delete_not_found_does_not_write() {
        let repo = repo();
        let user = UserId::new("alice");
        assert!(repo.delete(&user, TodoId(1)).unwrap_err().is_not_found());
        assert_eq!(repo.store().writes(), 0);
    }

    #[test]
    fn persist_failure_keeps_mutation_in_memory() {
        let repo = repo();
        let user = UserId::new("alice");
        repo.store().set_simulate_write_error(true);

        let created = repo.create(&user, NewTodo::new("volatile"));
        assert_eq!(created.durability, Durability::MemoryOnly);
        assert_eq!(repo.get(&user, created.value.id).unwrap(), created.value);
        assert!(repo.store().raw(&user).is_none());

        repo.store().set_simulate_write_error(false);
        let next = repo.create(&user, NewTodo::new("durable"));
        assert!(next.is_persisted());
        assert_eq!(next.value.id, TodoId(2));
        // The recovered write carries the earlier in-memory change too
        assert_eq!(repo.store().read(&user).unwrap().unwrap().todos.len(), 2);
    }

    #[test]
    fn corrupt_snapshot_is_quarantined_and_rebuilt() {
        let store = InMemoryStore::new();
        let user = UserId::new("mallory");
        store.put_raw(&user, "{\"todos\": [tru");
        let repo = TodoRepository::new(store);

        assert!(repo.list(&user, &ListQuery::all()).is_empty());
        assert_eq!(repo.store().quarantined().len(), 1);
        assert_eq!(repo.store().quarantined()[0].1, "{\"todos\": [tru");

        let created = repo.create(&user, NewTodo::new("fresh start"));
        assert_eq!(created.value.id, TodoId(1));
        assert!(created.is_persisted());
    }

    #[test]
    fn stale_next_id_is_repaired_on_load() {
        let store = InMemoryStore::new();
        let user = UserId::new("alice");
        store.put_raw(
            &user,
            r#"{"todos":[{"id":5,"title":"old","completed":false,"priority":"low","createdAt":"2024-05-01T10:00:00Z"}],"nextId":2}"#,
        );
        let repo = TodoRepository::new(store);

        let created = repo.create(&user, NewTodo::new("new"));
        assert_eq!(created.value.id, TodoId(6));
    }

    #[test]
    fn snapshot_without_next_id_starts_at_one() {
        let store = InMemoryStore::new();
        let user = UserId::new("alice");
        store.put_raw(&user, r#"{"todos":[]}"#);
        let repo = TodoRepository::new(store);
        assert_eq!(repo.create(&user, NewTodo::new("x")).value.id, TodoId(1));
    }

    #[test]
    fn list_returns_a_copy() {
        let repo = repo();
        let user = UserId::new("alice");
        repo.create(&user, NewTodo::new("a"));

        let mut listed = repo.list(&user, &ListQuery::all());
        listed[0].title = "mutated".into();
        listed.clear();

        assert_eq!(repo.list(&user, &ListQuery::all())[0].title, "a");
    }

    #[test]
    fn clear_completed_only_writes_when_something_changed() {
        let repo = repo();
        let user = UserId::new("alice");
        repo.create(&user, NewTodo::new("a"));
        let writes = repo.store().writes();

        assert!(repo.clear_completed(&user).value.is_empty());
        assert_eq!(repo.store().writes(), writes);

        repo.create(&user, NewTodo::new("b").completed(true));
        let cleared = repo.clear_completed(&user);
        assert_eq!(cleared.value.len(), 1);
        assert!(cleared.is_persisted());
        assert!(repo
            .list(&user, &ListQuery::all().with_filter(StatusFilter::Completed))
            .is_empty());
    }

    #[test]
    fn update_applies_patch_and_persists() {
        let repo = repo();
        let user = UserId::new("alice");
        let created = repo.create(&user, NewTodo::new("a")).value;

        let updated = repo
            .update(
                &user,
                created.id,
                &TodoPatch::default().priority(Priority::High).title(" b "),
            )
            .unwrap();
        assert_eq!(updated.value.title, "b");
        assert_eq!(updated.value.priority, Priority::High);

        let stored = repo.store().read(&user).unwrap().unwrap();
        assert_eq!(stored.todos[0], updated.value);
    }
}
