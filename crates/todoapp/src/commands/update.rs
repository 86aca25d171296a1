use crate::error::{Result, TodoError};
use crate::model::{Snapshot, Todo, TodoId, TodoPatch};

pub fn run(snapshot: &mut Snapshot, id: TodoId, patch: &TodoPatch) -> Result<Todo> {
    let todo = snapshot.find_mut(id).ok_or(TodoError::NotFound(id))?;
    patch.apply_to(todo);
    Ok(todo.clone())
}
