use crate::model::{Snapshot, Todo};

/// Removes every completed todo, returning them in their original order.
pub fn run(snapshot: &mut Snapshot) -> Vec<Todo> {
    let (removed, kept): (Vec<Todo>, Vec<Todo>) = std::mem::take(&mut snapshot.todos)
        .into_iter()
        .partition(|t| t.completed);
    snapshot.todos = kept;
    removed
}
