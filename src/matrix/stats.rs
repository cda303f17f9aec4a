//! Progress statistics and daily focus selection

use super::model::Task;
use chrono::{Local, NaiveDate};
use std::borrow::Borrow;

/// Summary counts over a task collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    /// Tasks not yet done
    pub active: usize,
    pub completed: usize,
    /// Done tasks whose last update falls on today's local date
    pub completed_today: usize,
    /// Rounded percentage of done tasks; 0 when there are no tasks
    pub completion_rate: u32,
    pub urgent_active: usize,
    pub important_active: usize,
}

pub fn task_stats<T: Borrow<Task>>(tasks: &[T], today: NaiveDate) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };

    for task in tasks.iter().map(Borrow::<Task>::borrow) {
        if task.is_done() {
            stats.completed += 1;
            if task.updated_at.with_timezone(&Local).date_naive() == today {
                stats.completed_today += 1;
            }
            continue;
        }
        stats.active += 1;
        if task.is_urgent {
            stats.urgent_active += 1;
        }
        if task.is_important {
            stats.important_active += 1;
        }
    }

    if stats.total > 0 {
        stats.completion_rate =
            ((stats.completed as f64 / stats.total as f64) * 100.0).round() as u32;
    }
    stats
}

/// Pick the single task to do first today
///
/// Candidates are open tasks that are both urgent and important. Must-have
/// tasks win; ties go to the oldest task.
pub fn daily_focus<T: Borrow<Task>>(tasks: &[T]) -> Option<&Task> {
    tasks
        .iter()
        .map(Borrow::<Task>::borrow)
        .filter(|t| t.is_urgent && t.is_important && !t.is_done())
        .min_by_key(|t| (!t.is_must_have(), t.created_at))
}
