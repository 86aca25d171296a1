//! # Todoz Server
//!
//! Todoz exposes the `todoapp` core over HTTP. This crate is deliberately thin:
//! it parses requests, validates raw input, and maps results to status codes.
//! Every todo operation is a single call into
//! [`TodoRepository`](todoapp::TodoRepository).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  HTTP Layer (http/)                                          │
//! │  - axum routes, x-user-id extraction, body validation        │
//! │  - Runs core calls on the blocking pool                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  todoapp::TodoRepository                                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`args`]: Command line flags
//! - [`http`]: Router, handlers, DTOs and error responses

pub mod args;
pub mod http;
