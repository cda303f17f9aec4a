use super::model::{
    ChecklistItem, NewProject, NewTask, Project, ProjectPatch, Task, TaskPatch, TaskStatus,
};
use crate::validation::{self, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

/// Current version of the data file layout
pub const FORMAT_VERSION: u32 = 1;

/// Lookup failures raised by [`MatrixData`] mutations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Task '{0}' not found")]
    TaskNotFound(String),

    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    #[error("Checklist item '{0}' not found")]
    ChecklistItemNotFound(String),

    #[error(
        "Checklist order for task '{task_id}' must list each of its {expected} item(s) exactly once"
    )]
    ChecklistOrderMismatch { task_id: String, expected: usize },
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_format_version() -> u32 {
    FORMAT_VERSION
}

/// All records of one user's matrix
///
/// Vecs keep insertion order, which is the order tasks are listed in before
/// any sorting is applied, and keeps the TOML file diff-friendly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixData {
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    #[serde(default)]
    pub(crate) projects: Vec<Project>,
    #[serde(default)]
    pub(crate) tasks: Vec<Task>,
    #[serde(default)]
    pub(crate) checklist_items: Vec<ChecklistItem>,
}

impl Default for MatrixData {
    fn default() -> Self {
        Self {
            format_version: FORMAT_VERSION,
            projects: Vec::new(),
            tasks: Vec::new(),
            checklist_items: Vec::new(),
        }
    }
}

impl MatrixData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn checklist_items(&self) -> &[ChecklistItem] {
        &self.checklist_items
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    // Projects

    /// Create a project with a fresh id and timestamps
    pub fn add_project(&mut self, input: NewProject, now: DateTime<Utc>) -> Project {
        let project = Project {
            id: new_id(),
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        self.projects.push(project.clone());
        project
    }

    pub fn update_project(
        &mut self,
        id: &str,
        patch: &ProjectPatch,
        now: DateTime<Utc>,
    ) -> Result<Project, StoreError> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::ProjectNotFound(id.to_string()))?;

        if let Some(name) = &patch.name {
            project.name = name.clone();
        }
        if let Some(description) = &patch.description {
            project.description = description.clone();
        }
        project.updated_at = now;
        Ok(project.clone())
    }

    /// Remove a project
    ///
    /// Tasks of the project are left in place with a dangling `project_id`;
    /// see [`MatrixData::orphaned_tasks`].
    pub fn remove_project(&mut self, id: &str) -> Result<Project, StoreError> {
        let pos = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::ProjectNotFound(id.to_string()))?;
        Ok(self.projects.remove(pos))
    }

    /// Number of tasks referencing a project id
    pub fn task_count_for_project(&self, project_id: &str) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .count()
    }

    /// Tasks whose project no longer exists
    pub fn orphaned_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.find_project(&t.project_id).is_none())
            .collect()
    }

    // Tasks

    /// Create a task in `todo` status
    pub fn add_task(&mut self, input: NewTask, now: DateTime<Utc>) -> Result<Task, StoreError> {
        if self.find_project(&input.project_id).is_none() {
            return Err(StoreError::ProjectNotFound(input.project_id));
        }

        let task = Task {
            id: new_id(),
            title: input.title,
            description: input.description,
            project_id: input.project_id,
            is_urgent: input.is_urgent,
            is_important: input.is_important,
            priority: input.priority,
            status: TaskStatus::Todo,
            deadline: input.deadline,
            created_at: now,
            updated_at: now,
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Apply a patch to a task and return the updated record
    ///
    /// Re-pointing a task at another project requires that project to exist.
    pub fn update_task(
        &mut self,
        id: &str,
        patch: &TaskPatch,
        now: DateTime<Utc>,
    ) -> Result<Task, StoreError> {
        if let Some(project_id) = &patch.project_id
            && self.find_project(project_id).is_none()
        {
            return Err(StoreError::ProjectNotFound(project_id.clone()));
        }

        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
        task.apply(patch, now);
        Ok(task.clone())
    }

    /// Remove a task together with its checklist
    pub fn remove_task(&mut self, id: &str) -> Result<Task, StoreError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
        self.checklist_items.retain(|i| i.task_id != id);
        Ok(self.tasks.remove(pos))
    }

    // Checklists

    /// Checklist of a task in position order
    pub fn checklist_for(&self, task_id: &str) -> Vec<&ChecklistItem> {
        let mut items: Vec<&ChecklistItem> = self
            .checklist_items
            .iter()
            .filter(|i| i.task_id == task_id)
            .collect();
        items.sort_by_key(|i| i.position);
        items
    }

    /// Append items to the end of a task's checklist
    pub fn add_checklist_items(
        &mut self,
        task_id: &str,
        titles: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<Vec<ChecklistItem>, StoreError> {
        if self.find_task(task_id).is_none() {
            return Err(StoreError::TaskNotFound(task_id.to_string()));
        }

        let next_position = self
            .checklist_for(task_id)
            .last()
            .map_or(0, |i| i.position.saturating_add(1));

        // Positions saturate at u32::MAX; ties keep insertion order
        let created: Vec<ChecklistItem> = titles
            .into_iter()
            .enumerate()
            .map(|(offset, title)| {
                let offset = u32::try_from(offset).unwrap_or(u32::MAX);
                ChecklistItem {
                    id: new_id(),
                    task_id: task_id.to_string(),
                    title,
                    is_completed: false,
                    position: next_position.saturating_add(offset),
                    created_at: now,
                    updated_at: now,
                }
            })
            .collect();
        self.checklist_items.extend(created.iter().cloned());
        Ok(created)
    }

    pub fn set_checklist_completed(
        &mut self,
        id: &str,
        is_completed: bool,
        now: DateTime<Utc>,
    ) -> Result<ChecklistItem, StoreError> {
        let item = self
            .checklist_items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::ChecklistItemNotFound(id.to_string()))?;
        item.is_completed = is_completed;
        item.updated_at = now;
        Ok(item.clone())
    }

    pub fn remove_checklist_item(&mut self, id: &str) -> Result<ChecklistItem, StoreError> {
        let pos = self
            .checklist_items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| StoreError::ChecklistItemNotFound(id.to_string()))?;
        Ok(self.checklist_items.remove(pos))
    }

    /// Rewrite positions so the checklist follows `ordered_ids`
    ///
    /// `ordered_ids` must name every item of the task exactly once. Only items
    /// whose position actually changes get a new `updated_at`.
    pub fn reorder_checklist(
        &mut self,
        task_id: &str,
        ordered_ids: &[String],
        now: DateTime<Utc>,
    ) -> Result<Vec<ChecklistItem>, StoreError> {
        if self.find_task(task_id).is_none() {
            return Err(StoreError::TaskNotFound(task_id.to_string()));
        }

        let current: HashSet<&str> = self
            .checklist_items
            .iter()
            .filter(|i| i.task_id == task_id)
            .map(|i| i.id.as_str())
            .collect();
        let requested: HashSet<&str> = ordered_ids.iter().map(String::as_str).collect();
        if requested.len() != ordered_ids.len() || requested != current {
            return Err(StoreError::ChecklistOrderMismatch {
                task_id: task_id.to_string(),
                expected: current.len(),
            });
        }

        for item in self
            .checklist_items
            .iter_mut()
            .filter(|i| i.task_id == task_id)
        {
            let Some(position) = ordered_ids.iter().position(|id| *id == item.id) else {
                continue;
            };
            let position = position as u32;
            if item.position != position {
                item.position = position;
                item.updated_at = now;
            }
        }

        Ok(self.checklist_for(task_id).into_iter().cloned().collect())
    }

    /// Check every record against the model's invariants
    ///
    /// Run on data coming from outside the process before it is used.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for project in &self.projects {
            if !seen.insert(project.id.as_str()) {
                return Err(ValidationError::DuplicateId {
                    kind: "project",
                    id: project.id.clone(),
                });
            }
            validation::check_project(project)?;
        }

        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.id.as_str()) {
                return Err(ValidationError::DuplicateId {
                    kind: "task",
                    id: task.id.clone(),
                });
            }
            validation::check_task(task)?;
        }

        let mut seen = HashSet::new();
        for item in &self.checklist_items {
            if !seen.insert(item.id.as_str()) {
                return Err(ValidationError::DuplicateId {
                    kind: "checklist item",
                    id: item.id.clone(),
                });
            }
            validation::check_checklist_item(item)?;
        }
        Ok(())
    }
}
