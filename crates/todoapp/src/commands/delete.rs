use crate::error::{Result, TodoError};
use crate::model::{Snapshot, Todo, TodoId};

pub fn run(snapshot: &mut Snapshot, id: TodoId) -> Result<Todo> {
    let index = snapshot.position(id).ok_or(TodoError::NotFound(id))?;
    Ok(snapshot.todos.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::model::NewTodo;

    #[test]
    fn removes_and_preserves_order_of_the_rest() {
        let mut snapshot = Snapshot::default();
        for title in ["a", "b", "c"] {
            create::run(&mut snapshot, NewTodo::new(title));
        }

        let removed = run(&mut snapshot, TodoId(2)).unwrap();
        assert_eq!(removed.title, "b");
        let titles: Vec<_> = snapshot.todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let mut snapshot = Snapshot::default();
        let first = create::run(&mut snapshot, NewTodo::new("a"));
        run(&mut snapshot, first.id).unwrap();

        let next = create::run(&mut snapshot, NewTodo::new("b"));
        assert_ne!(next.id, first.id);
        assert!(next.id > first.id);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut snapshot = Snapshot::default();
        assert!(matches!(
            run(&mut snapshot, TodoId(1)),
            Err(TodoError::NotFound(TodoId(1)))
        ));
    }
}
