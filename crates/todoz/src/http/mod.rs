//! # HTTP Layer
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/health` | liveness |
//! | GET | `/todos?filter=&search=` | list |
//! | POST | `/todos` | create |
//! | DELETE | `/todos/completed` | clear completed |
//! | GET | `/todos/stats` | stats |
//! | GET | `/todos/{id}` | get |
//! | PUT, PATCH | `/todos/{id}` | update |
//! | DELETE | `/todos/{id}` | delete |
//!
//! Every `/todos` route requires an `x-user-id` header. Mutations answer with
//! `x-todo-durability: persisted | memory-only`.

use axum::routing::{delete, get};
use axum::Router;
use std::sync::Arc;
use todoapp::store::SnapshotStore;
use todoapp::TodoRepository;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod error;
pub mod handlers;
pub mod user;

pub type SharedRepository = Arc<TodoRepository<Arc<dyn SnapshotStore>>>;

#[derive(Clone)]
pub struct AppState {
    pub repo: SharedRepository,
}

impl AppState {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            repo: Arc::new(TodoRepository::new(store)),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route("/todos/completed", delete(handlers::clear_completed))
        .route("/todos/stats", get(handlers::todo_stats))
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .patch(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
