//! # Storage Layer
//!
//! This module defines the durable half of todoapp. A [`SnapshotStore`] maps a
//! [`UserId`] to one *durable slot* holding that user's full [`Snapshot`]
//! (`{todos, nextId}`).
//!
//! ## What Lives Here
//!
//! A store is a codec plus an atomic-replace primitive. Nothing more:
//! - **No caching**: the repository owns the cache.
//! - **No locking**: the repository serializes access per user.
//! - **No cross-user logic**: every call touches exactly one slot.
//!
//! ## Failure Semantics
//!
//! - `read` returns `Ok(None)` when the slot does not exist yet, and
//!   [`TodoError::CorruptSnapshot`](crate::error::TodoError::CorruptSnapshot)
//!   when it exists but cannot be parsed.
//! - `write` replaces the slot atomically: a reader sees either the previous
//!   snapshot or the new one, never a prefix of it.
//! - `quarantine` moves an unreadable slot aside so a rebuilt state does not
//!   overwrite the damaged bytes.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production store, one JSON file per user.
//! - [`memory::InMemoryStore`]: for tests, with write-failure simulation.
//!
//! ## Storage Layout
//!
//! For `FileStore`:
//! ```text
//! <data_dir>/
//! ├── user-alice.json                    # Snapshot for "alice"
//! ├── user-bob_40example_2Ecom.json      # Snapshot for "bob@example.com"
//! ├── user-_40_40_40...~<uuid>.json      # Long ids: encoded prefix + digest
//! └── user-mallory.json.corrupt-<ts>     # Quarantined, never read again
//! ```

use crate::error::Result;
use crate::model::{Snapshot, UserId};
use std::path::PathBuf;
use std::sync::Arc;

pub mod fs;
pub mod memory;

/// Durable per-user snapshot storage.
pub trait SnapshotStore: Send + Sync {
    /// Read the stored snapshot, or `None` if the user has never been written.
    fn read(&self, user: &UserId) -> Result<Option<Snapshot>>;

    /// Persist the full snapshot, replacing any prior one.
    /// MUST be atomic (e.g. write to tmp then rename).
    fn write(&self, user: &UserId, snapshot: &Snapshot) -> Result<()>;

    /// Move an unreadable slot out of the way.
    /// Returns where it went, or `None` if there was nothing to move.
    fn quarantine(&self, _user: &UserId) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for Arc<T> {
    fn read(&self, user: &UserId) -> Result<Option<Snapshot>> {
        (**self).read(user)
    }

    fn write(&self, user: &UserId, snapshot: &Snapshot) -> Result<()> {
        (**self).write(user, snapshot)
    }

    fn quarantine(&self, user: &UserId) -> Result<Option<PathBuf>> {
        (**self).quarantine(user)
    }
}
