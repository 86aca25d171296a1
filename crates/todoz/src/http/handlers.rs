use super::dto::{ClearedResponse, CreateTodoRequest, ListParams, UpdateTodoRequest};
use super::error::ApiErrorResponse;
use super::user::CurrentUser;
use super::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use todoapp::commands::TodoStats;
use todoapp::model::{Todo, TodoId};
use todoapp::store::SnapshotStore;
use todoapp::{Committed, TodoRepository};

pub const DURABILITY_HEADER: &str = "x-todo-durability";

type Repo = TodoRepository<Arc<dyn SnapshotStore>>;
type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Runs a repository call on the blocking pool; file writes happen inside it.
async fn run_blocking<T, F>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&Repo) -> T + Send + 'static,
    T: Send + 'static,
{
    let repo = Arc::clone(&state.repo);
    Ok(tokio::task::spawn_blocking(move || f(&*repo)).await?)
}

fn committed_response<T: Serialize>(status: StatusCode, committed: Committed<T>) -> Response {
    let durability = [(
        HeaderName::from_static(DURABILITY_HEADER),
        HeaderValue::from_static(committed.durability.as_str()),
    )];
    (status, durability, Json(committed.value)).into_response()
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_todos(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Todo>>> {
    let query = params.into_query();
    let todos = run_blocking(&state, move |repo| repo.list(&user, &query)).await?;
    Ok(Json(todos))
}

pub async fn todo_stats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<TodoStats>> {
    let stats = run_blocking(&state, move |repo| repo.stats(&user)).await?;
    Ok(Json(stats))
}

pub async fn get_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<Todo>> {
    let Path(id) = id?;
    let todo = run_blocking(&state, move |repo| repo.get(&user, TodoId(id))).await??;
    Ok(Json(todo))
}

pub async fn create_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(request) = body?;
    let new = request.into_new_todo()?;
    let committed = run_blocking(&state, move |repo| repo.create(&user, new)).await?;
    Ok(committed_response(StatusCode::CREATED, committed))
}

pub async fn update_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let Path(id) = id?;
    let Json(request) = body?;
    let patch = request.into_patch()?;
    let committed =
        run_blocking(&state, move |repo| repo.update(&user, TodoId(id), &patch)).await??;
    Ok(committed_response(StatusCode::OK, committed))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Response> {
    let Path(id) = id?;
    let committed = run_blocking(&state, move |repo| repo.delete(&user, TodoId(id))).await??;
    Ok(committed_response(StatusCode::OK, committed))
}

pub async fn clear_completed(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Response> {
    let committed = run_blocking(&state, move |repo| repo.clear_completed(&user)).await?;
    let committed = Committed {
        value: ClearedResponse {
            removed: committed.value,
        },
        durability: committed.durability,
    };
    Ok(committed_response(StatusCode::OK, committed))
}
