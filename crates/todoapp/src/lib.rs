//! # Todoapp Architecture
//!
//! Todoapp is the **per-user persistence and mutation core** of todoz. It keeps one
//! todo list per opaque user id, caches it in memory, and writes it through to a
//! plain JSON file after every change. No database involved.
//!
//! The HTTP server in the `todoz` crate is one client of this library. Nothing in
//! here knows about HTTP, terminals, or process lifecycle.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Repository (repository.rs)                                  │
//! │  - Per-user cache and per-user locking                       │
//! │  - Resolves state: cache hit, cold load, or fresh            │
//! │  - Writes through after every mutation                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                               │
//! │  - Pure business logic on one user's Snapshot               │
//! │  - id allocation, trimming, filtering, stats                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                      │
//! │  - SnapshotStore trait: read / atomic write / quarantine     │
//! │  - FileStore (production), InMemoryStore (testing)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! - Ids are unique within a user and never reused, even after deletion.
//! - `nextId` is persisted with the todos, so restarts do not reuse ids either.
//! - One user's calls never read or write another user's state.
//! - Once a user is cached, the cache is the truth; the file is read once.
//!
//! ## Errors
//!
//! Only [`TodoError::NotFound`](error::TodoError::NotFound) reaches callers in
//! normal operation. Unreadable snapshots start the user fresh, failed writes are
//! reported as [`Durability::MemoryOnly`](repository::Durability::MemoryOnly).
//! Both are logged with `tracing`.
//!
//! ## Module Overview
//!
//! - [`repository`]: The entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Todo`, `Snapshot`, `UserId`)
//! - [`validation`]: Title rules for callers that accept raw input
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod repository;
pub mod store;
pub mod validation;

pub use repository::{Committed, Durability, TodoRepository};
