use crate::model::{NewTodo, Snapshot, Todo};

pub fn run(snapshot: &mut Snapshot, new: NewTodo) -> Todo {
    let id = snapshot.allocate_id();
    let todo = Todo::new(id, &new.title, new.completed, new.priority);
    snapshot.todos.push(todo.clone());
    todo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TodoId};

    #[test]
    fn allocates_sequential_ids_and_appends() {
        let mut snapshot = Snapshot::default();
        let a = run(&mut snapshot, NewTodo::new("a"));
        let b = run(&mut snapshot, NewTodo::new("b"));

        assert_eq!(a.id, TodoId(1));
        assert_eq!(b.id, TodoId(2));
        assert_eq!(snapshot.next_id, 3);
        let titles: Vec<_> = snapshot.todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn trims_title_and_applies_defaults() {
        let mut snapshot = Snapshot::default();
        let todo = run(&mut snapshot, NewTodo::new("  hi  "));
        assert_eq!(todo.title, "hi");
        assert!(!todo.completed);
        assert_eq!(todo.priority, Priority::Medium);
    }

    #[test]
    fn honours_explicit_fields() {
        let mut snapshot = Snapshot::default();
        let todo = run(
            &mut snapshot,
            NewTodo::new("done already")
                .completed(true)
                .priority(Priority::High),
        );
        assert!(todo.completed);
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(snapshot.todos[0], todo);
    }
}
