use super::model::ChecklistItem;
use std::borrow::Borrow;

/// Completion summary of a task's checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChecklistProgress {
    pub completed: usize,
    pub total: usize,
    /// False for an empty checklist
    pub is_fully_complete: bool,
}

impl ChecklistProgress {
    /// Badge text such as "2/5", or `None` when there is nothing to show
    pub fn badge(&self) -> Option<String> {
        (self.total > 0).then(|| format!("{}/{}", self.completed, self.total))
    }
}

pub fn summarize<T, I>(items: I) -> ChecklistProgress
where
    T: Borrow<ChecklistItem>,
    I: IntoIterator<Item = T>,
{
    let (completed, total) = items.into_iter().fold((0, 0), |(done, total), item| {
        let item: &ChecklistItem = item.borrow();
        (done + usize::from(item.is_completed), total + 1)
    });

    ChecklistProgress {
        completed,
        total,
        is_fully_complete: total > 0 && completed == total,
    }
}
