use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a task or checklist item title, in characters
pub const MAX_TITLE_LEN: usize = 200;
/// Maximum length of a task description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 5000;
/// Maximum length of a project name, in characters
pub const MAX_PROJECT_NAME_LEN: usize = 100;
/// Maximum length of a project description, in characters
pub const MAX_PROJECT_DESCRIPTION_LEN: usize = 500;

/// Workflow status of a task
///
/// Transitions are user-driven; any status can be reached from any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started (initial status)
    #[default]
    Todo,
    /// Being worked on
    InProgress,
    /// Waiting on something outside the user's control
    Blocked,
    /// Completed
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "blocked" => Ok(TaskStatus::Blocked),
            "done" => Ok(TaskStatus::Done),
            _ => Err(format!(
                "Invalid status '{}'. Valid options are: todo, in_progress, blocked, done",
                s
            )),
        }
    }
}

/// Two-level priority, orthogonal to quadrant placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    MustHave,
    NiceToHave,
}

impl Priority {
    pub const ALL: [Priority; 2] = [Priority::MustHave, Priority::NiceToHave];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::MustHave => "must_have",
            Priority::NiceToHave => "nice_to_have",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "must_have" => Ok(Priority::MustHave),
            "nice_to_have" => Ok(Priority::NiceToHave),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options are: must_have, nice_to_have",
                s
            )),
        }
    }
}

/// One actionable item on the matrix
///
/// `is_urgent` and `is_important` carry no serde default: a record missing
/// either flag is rejected when the data file is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Optional details in Markdown format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Owning project. May dangle after the project is deleted.
    pub project_id: String,
    pub is_urgent: bool,
    pub is_important: bool,
    /// `None` sorts after must-have tasks and never matches a priority filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    pub fn is_must_have(&self) -> bool {
        self.priority == Some(Priority::MustHave)
    }

    /// Apply a patch in place and bump `updated_at`
    ///
    /// All fields of the patch are written together, so a quadrant move
    /// changes both flags or neither.
    pub fn apply(&mut self, patch: &TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(project_id) = &patch.project_id {
            self.project_id = project_id.clone();
        }
        if let Some(is_urgent) = patch.is_urgent {
            self.is_urgent = is_urgent;
        }
        if let Some(is_important) = patch.is_important {
            self.is_important = is_important;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
        self.updated_at = now;
    }
}

/// A named grouping of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A sub-step of a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub task_id: String,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    /// Ordering key within the owning task
    #[serde(default)]
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a task
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub project_id: String,
    pub is_urgent: bool,
    pub is_important: bool,
    pub priority: Option<Priority>,
    pub deadline: Option<NaiveDate>,
}

/// Validated input for creating a project
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
}

/// Partial task record: only the fields a mutation intends to change
///
/// Clearable fields use a nested `Option`: `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub project_id: Option<String>,
    pub is_urgent: Option<bool>,
    pub is_important: Option<bool>,
    pub priority: Option<Option<Priority>>,
    pub status: Option<TaskStatus>,
    pub deadline: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial project record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}
