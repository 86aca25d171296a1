use crate::commands::ListQuery;
use crate::model::{Snapshot, Todo};

pub fn run(snapshot: &Snapshot, query: &ListQuery) -> Vec<Todo> {
    let term = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    snapshot
        .todos
        .iter()
        .filter(|t| query.filter.is_none_or(|f| f.matches(t.completed)))
        .filter(|t| {
            term.as_ref()
                .is_none_or(|term| t.title.to_lowercase().contains(term.as_str()))
        })
        .cloned()
        .collect()
}
