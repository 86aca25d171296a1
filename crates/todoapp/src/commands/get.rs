use crate::error::{Result, TodoError};
use crate::model::{Snapshot, Todo, TodoId};

pub fn run(snapshot: &Snapshot, id: TodoId) -> Result<Todo> {
    snapshot.find(id).cloned().ok_or(TodoError::NotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::model::NewTodo;

    #[test]
    fn finds_by_id() {
        let mut snapshot = Snapshot::default();
        let created = create::run(&mut snapshot, NewTodo::new("x"));
        assert_eq!(run(&snapshot, created.id).unwrap(), created);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let snapshot = Snapshot::default();
        match run(&snapshot, TodoId(7)) {
            Err(TodoError::NotFound(id)) => assert_eq!(id, TodoId(7)),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }
}
