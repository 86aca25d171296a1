use crate::commands::{PriorityCounts, TodoStats};
use crate::model::{Priority, Snapshot};

pub fn run(snapshot: &Snapshot) -> TodoStats {
    let total = snapshot.todos.len();
    let completed = snapshot.todos.iter().filter(|t| t.completed).count();

    let mut priority_counts = PriorityCounts::default();
    for todo in &snapshot.todos {
        match todo.priority {
            Priority::Low => priority_counts.low += 1,
            Priority::Medium => priority_counts.medium += 1,
            Priority::High => priority_counts.high += 1,
        }
    }

    TodoStats {
        total,
        completed,
        pending: total - completed,
        completion_rate: completion_rate(completed, total),
        priority_counts,
    }
}

fn completion_rate(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 * 100.0 / total as f64).round() as u32
}
