//! Task filtering and priority sorting
//!
//! Every dimension of [`TaskFilters`] follows the same convention: an empty
//! selection matches everything. Active dimensions are combined with AND.

use super::deadline::{DeadlineBucket, matches_any_bucket};
use super::model::{Priority, Task, TaskStatus};
use chrono::NaiveDate;
use std::borrow::Borrow;
use std::collections::HashSet;

/// User-entered filter state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    /// Case-insensitive substring searched in title and description
    pub search: String,
    pub status: HashSet<TaskStatus>,
    /// Selected deadline buckets, combined with OR
    pub deadline: HashSet<DeadlineBucket>,
    pub priority: HashSet<Priority>,
    /// Selected project ids. Tasks pointing at a deleted project simply
    /// never match a non-empty selection.
    pub projects: HashSet<String>,
}

impl TaskFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no dimension constrains the result
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.status.is_empty()
            && self.deadline.is_empty()
            && self.priority.is_empty()
            && self.projects.is_empty()
    }

    /// Check a single task against every active dimension
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        matches_projects(task, &self.projects)
            && matches_search(task, &self.search)
            && (self.status.is_empty() || self.status.contains(&task.status))
            && matches_any_bucket(task.deadline, &self.deadline, today)
            && (self.priority.is_empty()
                || task.priority.is_some_and(|p| self.priority.contains(&p)))
    }

    /// Retain only matching tasks, preserving their order
    pub fn apply<T: Borrow<Task>>(&self, tasks: &mut Vec<T>, today: NaiveDate) {
        if self.is_empty() {
            return;
        }
        tasks.retain(|task| self.matches(Borrow::<Task>::borrow(task), today));
    }
}

/// Filter a task collection, returning matches in input order
pub fn apply_filters<T: Borrow<Task>>(
    mut tasks: Vec<T>,
    filters: &TaskFilters,
    today: NaiveDate,
) -> Vec<T> {
    filters.apply(&mut tasks, today);
    tasks
}

/// Case-insensitive match on title or description; empty keyword matches all
pub fn matches_search(task: &Task, keyword: &str) -> bool {
    if keyword.is_empty() {
        return true;
    }
    let keyword_lower = keyword.to_lowercase();

    let title_matches = task.title.to_lowercase().contains(&keyword_lower);

    let description_matches = task
        .description
        .as_ref()
        .map(|d| d.to_lowercase().contains(&keyword_lower))
        .unwrap_or(false);

    title_matches || description_matches
}

/// Project scoping; an empty selection includes all projects
pub fn matches_projects(task: &Task, projects: &HashSet<String>) -> bool {
    projects.is_empty() || projects.contains(&task.project_id)
}

/// Stable sort placing must-have tasks before all others
///
/// Tasks of equal rank keep their relative order.
pub fn sort_by_priority<T: Borrow<Task>>(tasks: &mut [T]) {
    tasks.sort_by_key(|task| !Borrow::<Task>::borrow(task).is_must_have());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn task(id: &str, title: &str) -> Task {
        let now = Utc::now();
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            project_id: "p-1".to_string(),
            is_urgent: false,
            is_important: false,
            priority: None,
            status: TaskStatus::Todo,
            deadline: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    fn sample() -> Vec<Task> {
        let mut a = task("a", "ABCdef");
        a.priority = Some(Priority::MustHave);
        a.deadline = Some(today());

        let mut b = task("b", "Groceries");
        b.description = Some("buy abc batteries".to_string());
        b.status = TaskStatus::InProgress;
        b.priority = Some(Priority::NiceToHave);

        let mut c = task("c", "Taxes");
        c.status = TaskStatus::Done;
        c.deadline = NaiveDate::from_ymd_opt(2025, 6, 1);
        c.project_id = "p-2".to_string();

        let mut d = task("d", "Call plumber");
        d.status = TaskStatus::Blocked;
        d.priority = Some(Priority::MustHave);
        d.deadline = NaiveDate::from_ymd_opt(2025, 7, 2);
        d.project_id = "deleted-project".to_string();

        vec![a, b, c, d]
    }

    #[test]
    fn test_empty_filters_are_identity() {
        let tasks = sample();
        let result = apply_filters(tasks.clone(), &TaskFilters::new(), today());
        assert_eq!(result, tasks);
    }

    #[test]
    fn test_search_title_or_description_case_insensitive() {
        let filters = TaskFilters {
            search: "abc".to_string(),
            ..TaskFilters::default()
        };
        let result = apply_filters(sample(), &filters, today());
        assert_eq!(ids(&result), vec!["a", "b"]);
    }

    #[test]
    fn test_search_with_missing_description() {
        let t = task("x", "Unrelated");
        assert!(!matches_search(&t, "abc"));
        assert!(matches_search(&t, "RELATED"));
        assert!(matches_search(&t, ""));
    }

    #[test]
    fn test_status_filter() {
        let filters = TaskFilters {
            status: HashSet::from([TaskStatus::Done, TaskStatus::Blocked]),
            ..TaskFilters::default()
        };
        let result = apply_filters(sample(), &filters, today());
        assert_eq!(ids(&result), vec!["c", "d"]);
    }

    #[test]
    fn test_deadline_filter_uses_or() {
        let filters = TaskFilters {
            deadline: HashSet::from([DeadlineBucket::Overdue, DeadlineBucket::NoDeadline]),
            ..TaskFilters::default()
        };
        let result = apply_filters(sample(), &filters, today());
        assert_eq!(ids(&result), vec!["b", "c"]);
    }

    #[test]
    fn test_priority_filter_skips_unset_priority() {
        let filters = TaskFilters {
            priority: HashSet::from([Priority::NiceToHave]),
            ..TaskFilters::default()
        };
        let result = apply_filters(sample(), &filters, today());
        assert_eq!(ids(&result), vec!["b"]);
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let filters = TaskFilters {
            priority: HashSet::from([Priority::MustHave]),
            deadline: HashSet::from([DeadlineBucket::ThisMonth]),
            ..TaskFilters::default()
        };
        let result = apply_filters(sample(), &filters, today());
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn test_project_scope_tolerates_unknown_project() {
        let filters = TaskFilters {
            projects: HashSet::from(["p-1".to_string()]),
            ..TaskFilters::default()
        };
        let result = apply_filters(sample(), &filters, today());
        assert_eq!(ids(&result), vec!["a", "b"]);

        let filters = TaskFilters {
            projects: HashSet::from(["deleted-project".to_string()]),
            ..TaskFilters::default()
        };
        let result = apply_filters(sample(), &filters, today());
        assert_eq!(ids(&result), vec!["d"]);
    }

    #[test]
    fn test_filters_on_borrowed_tasks() {
        let tasks = sample();
        let filters = TaskFilters {
            status: HashSet::from([TaskStatus::Todo]),
            ..TaskFilters::default()
        };
        let result = apply_filters(tasks.iter().collect(), &filters, today());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        let mut tasks = vec![
            task("n1", "nice 1"),
            task("m1", "must 1"),
            task("u1", "unset 1"),
            task("m2", "must 2"),
            task("n2", "nice 2"),
        ];
        tasks[0].priority = Some(Priority::NiceToHave);
        tasks[1].priority = Some(Priority::MustHave);
        tasks[3].priority = Some(Priority::MustHave);
        tasks[4].priority = Some(Priority::NiceToHave);

        sort_by_priority(&mut tasks);
        assert_eq!(ids(&tasks), vec!["m1", "m2", "n1", "u1", "n2"]);

        let once = tasks.clone();
        sort_by_priority(&mut tasks);
        assert_eq!(tasks, once);
    }
}
