//! # Commands
//!
//! Business logic for each repository operation, one module per operation.
//!
//! Commands operate on a single user's [`Snapshot`](crate::model::Snapshot)
//! that the caller already holds exclusively. They never touch storage, never
//! lock, and never log. Resolution, locking and persistence belong to
//! [`TodoRepository`](crate::repository::TodoRepository).

use serde::Serialize;

pub mod clear;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod stats;
pub mod update;

/// Restricts `list` by completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Completed,
    Pending,
}

impl StatusFilter {
    /// `"completed"` and `"pending"` select a filter; anything else means none.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "completed" => Some(StatusFilter::Completed),
            "pending" => Some(StatusFilter::Pending),
            _ => None,
        }
    }

    pub fn matches(&self, completed: bool) -> bool {
        match self {
            StatusFilter::Completed => completed,
            StatusFilter::Pending => !completed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: Option<StatusFilter>,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: StatusFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Whole percent, 0 when there are no todos.
    pub completion_rate: u32,
    pub priority_counts: PriorityCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_filter_values_mean_no_filter() {
        assert_eq!(StatusFilter::parse("completed"), Some(StatusFilter::Completed));
        assert_eq!(StatusFilter::parse("pending"), Some(StatusFilter::Pending));
        assert_eq!(StatusFilter::parse("all"), None);
        assert_eq!(StatusFilter::parse("Completed"), None);
        assert_eq!(StatusFilter::parse(""), None);
    }
}
