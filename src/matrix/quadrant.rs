//! Eisenhower quadrant classification
//!
//! A task's quadrant is derived from its two flags and nothing else.

use super::model::Task;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One of the four urgency x importance categories
///
/// Variant order is the display order of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    UrgentImportant,
    NotUrgentImportant,
    UrgentNotImportant,
    NotUrgentNotImportant,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::UrgentImportant,
        Quadrant::NotUrgentImportant,
        Quadrant::UrgentNotImportant,
        Quadrant::NotUrgentNotImportant,
    ];

    pub fn from_flags(is_urgent: bool, is_important: bool) -> Self {
        match (is_urgent, is_important) {
            (true, true) => Quadrant::UrgentImportant,
            (true, false) => Quadrant::UrgentNotImportant,
            (false, true) => Quadrant::NotUrgentImportant,
            (false, false) => Quadrant::NotUrgentNotImportant,
        }
    }

    pub fn is_urgent(&self) -> bool {
        matches!(
            self,
            Quadrant::UrgentImportant | Quadrant::UrgentNotImportant
        )
    }

    pub fn is_important(&self) -> bool {
        matches!(
            self,
            Quadrant::UrgentImportant | Quadrant::NotUrgentImportant
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "urgent-important",
            Quadrant::UrgentNotImportant => "urgent-not-important",
            Quadrant::NotUrgentImportant => "not-urgent-important",
            Quadrant::NotUrgentNotImportant => "not-urgent-not-important",
        }
    }

    /// Human-readable heading
    pub fn title(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "Urgent & Important",
            Quadrant::UrgentNotImportant => "Urgent & Not Important",
            Quadrant::NotUrgentImportant => "Not Urgent & Important",
            Quadrant::NotUrgentNotImportant => "Not Urgent & Not Important",
        }
    }

    /// The Eisenhower action associated with the quadrant
    pub fn action(&self) -> &'static str {
        match self {
            Quadrant::UrgentImportant => "Do First",
            Quadrant::NotUrgentImportant => "Schedule",
            Quadrant::UrgentNotImportant => "Delegate",
            Quadrant::NotUrgentNotImportant => "Eliminate",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quadrant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quadrant::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid quadrant '{}'. Valid options are: urgent-important, urgent-not-important, not-urgent-important, not-urgent-not-important",
                    s
                )
            })
    }
}

/// Classify a task into its quadrant
pub fn classify(task: &Task) -> Quadrant {
    Quadrant::from_flags(task.is_urgent, task.is_important)
}

/// Tasks partitioned into the four quadrants
///
/// All four quadrants are always present, possibly empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TasksByQuadrant<T> {
    buckets: BTreeMap<Quadrant, Vec<T>>,
}

impl<T> TasksByQuadrant<T> {
    fn empty() -> Self {
        Self {
            buckets: Quadrant::ALL.into_iter().map(|q| (q, Vec::new())).collect(),
        }
    }

    pub fn get(&self, quadrant: Quadrant) -> &[T] {
        self.buckets
            .get(&quadrant)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get_mut(&mut self, quadrant: Quadrant) -> &mut Vec<T> {
        self.buckets.entry(quadrant).or_default()
    }

    /// Iterate quadrants in display order
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &[T])> {
        self.buckets.iter().map(|(q, tasks)| (*q, tasks.as_slice()))
    }

    /// Total number of tasks across all quadrants
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partition tasks by quadrant, keeping input order within each bucket
pub fn group_by_quadrant<T, I>(tasks: I) -> TasksByQuadrant<T>
where
    T: Borrow<Task>,
    I: IntoIterator<Item = T>,
{
    let mut grouped = TasksByQuadrant::empty();
    for task in tasks {
        let quadrant = classify(Borrow::<Task>::borrow(&task));
        grouped.get_mut(quadrant).push(task);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::model::TaskStatus;
    use chrono::Utc;

    fn task(id: &str, is_urgent: bool, is_important: bool) -> Task {
        let now = Utc::now();
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: None,
            project_id: "p-1".to_string(),
            is_urgent,
            is_important,
            priority: None,
            status: TaskStatus::Todo,
            deadline: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_classify_fixed_mapping() {
        assert_eq!(classify(&task("a", true, true)), Quadrant::UrgentImportant);
        assert_eq!(
            classify(&task("b", true, false)),
            Quadrant::UrgentNotImportant
        );
        assert_eq!(
            classify(&task("c", false, true)),
            Quadrant::NotUrgentImportant
        );
        assert_eq!(
            classify(&task("d", false, false)),
            Quadrant::NotUrgentNotImportant
        );
    }

    #[test]
    fn test_flags_round_trip() {
        for quadrant in Quadrant::ALL {
            assert_eq!(
                Quadrant::from_flags(quadrant.is_urgent(), quadrant.is_important()),
                quadrant
            );
        }
    }

    #[test]
    fn test_parse_quadrant() {
        assert_eq!(
            "not-urgent-important".parse::<Quadrant>().unwrap(),
            Quadrant::NotUrgentImportant
        );
        assert!("urgent".parse::<Quadrant>().is_err());
    }

    #[test]
    fn test_actions() {
        assert_eq!(Quadrant::UrgentImportant.action(), "Do First");
        assert_eq!(Quadrant::NotUrgentImportant.action(), "Schedule");
        assert_eq!(Quadrant::UrgentNotImportant.action(), "Delegate");
        assert_eq!(Quadrant::NotUrgentNotImportant.action(), "Eliminate");
    }

    #[test]
    fn test_group_empty_input_has_four_buckets() {
        let grouped = group_by_quadrant(Vec::<Task>::new());
        assert_eq!(grouped.iter().count(), 4);
        assert!(grouped.is_empty());
        for quadrant in Quadrant::ALL {
            assert!(grouped.get(quadrant).is_empty());
        }
    }

    #[test]
    fn test_group_partitions_and_preserves_order() {
        let tasks = vec![
            task("1", true, true),
            task("2", false, false),
            task("3", true, true),
            task("4", false, true),
            task("5", true, false),
            task("6", false, true),
        ];

        let grouped = group_by_quadrant(&tasks);

        assert_eq!(grouped.len(), tasks.len());
        let ids = |q: Quadrant| {
            grouped
                .get(q)
                .iter()
                .map(|t| t.id.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(Quadrant::UrgentImportant), vec!["1", "3"]);
        assert_eq!(ids(Quadrant::NotUrgentImportant), vec!["4", "6"]);
        assert_eq!(ids(Quadrant::UrgentNotImportant), vec!["5"]);
        assert_eq!(ids(Quadrant::NotUrgentNotImportant), vec!["2"]);
    }
}
