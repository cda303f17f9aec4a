//! Validation helper functions for the Qdo MCP server
//!
//! Raw tool arguments and records read from disk are parsed and checked here
//! before they reach the matrix. Nothing that fails these checks is stored.

use crate::matrix::{
    ChecklistItem, DeadlineBucket, MAX_DESCRIPTION_LEN, MAX_PROJECT_DESCRIPTION_LEN,
    MAX_PROJECT_NAME_LEN, MAX_TITLE_LEN, MatrixData, NewProject, NewTask, Priority, Project,
    Quadrant, Task, TaskStatus,
};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be {max} characters or less (got {len})")]
    TooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("{0}")]
    InvalidValue(String),

    #[error("Invalid date format '{0}'. Use YYYY-MM-DD (e.g., '2025-03-15')")]
    InvalidDate(String),

    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
}

/// Raw task fields as entered in a create form
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub project_id: String,
    pub is_urgent: bool,
    pub is_important: bool,
    pub priority: Option<String>,
    pub deadline: Option<String>,
}

/// Wrap a validation failure as an MCP invalid-params error
pub fn invalid_params(err: impl Display) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(err.to_string(), true)
}

/// Normalize a record ID by trimming surrounding whitespace
pub fn normalize_id(id: &str) -> String {
    id.trim().to_string()
}

/// Check a required, length-limited text field and return it trimmed
pub fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    check_len(field, value, max)?;
    Ok(value.to_string())
}

/// Check an optional text field; an empty string means "not set"
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => {
            check_len(field, v, max)?;
            Ok(Some(v.to_string()))
        }
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, max, len });
    }
    Ok(())
}

fn parse_value<T: FromStr<Err = String>>(value: &str) -> Result<T, ValidationError> {
    value.trim().parse::<T>().map_err(ValidationError::InvalidValue)
}

pub fn parse_status(value: &str) -> Result<TaskStatus, ValidationError> {
    parse_value(value)
}

pub fn parse_priority(value: &str) -> Result<Priority, ValidationError> {
    parse_value(value)
}

pub fn parse_quadrant(value: &str) -> Result<Quadrant, ValidationError> {
    parse_value(value)
}

/// Parse a date in YYYY-MM-DD format
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Parse an optional, clearable value: `""` means clear, absent means keep
pub fn parse_clearable<T>(
    value: Option<&str>,
    parse: impl Fn(&str) -> Result<T, ValidationError>,
) -> Result<Option<Option<T>>, ValidationError> {
    match value.map(str::trim) {
        None => Ok(None),
        Some("") => Ok(Some(None)),
        Some(v) => parse(v).map(|parsed| Some(Some(parsed))),
    }
}

/// Parse a comma-separated multi-selection such as `"todo,blocked"`
///
/// Blank entries are ignored, so `None` and `""` both yield an empty set.
pub fn parse_selection<T>(value: Option<&str>) -> Result<HashSet<T>, ValidationError>
where
    T: FromStr<Err = String> + Eq + Hash,
{
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_value)
        .collect()
}

pub fn parse_deadline_selection(
    value: Option<&str>,
) -> Result<HashSet<DeadlineBucket>, ValidationError> {
    parse_selection(value)
}

/// Comma-separated list of ids, trimmed, blanks dropped
pub fn parse_id_list(value: Option<&str>) -> HashSet<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(normalize_id)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Validate create-form input for a task
///
/// Project existence is checked by the matrix when the task is stored.
pub fn validate_new_task(draft: TaskDraft) -> Result<NewTask, ValidationError> {
    let title = required_text("Title", &draft.title, MAX_TITLE_LEN)?;
    let description = optional_text("Description", draft.description.as_deref(), MAX_DESCRIPTION_LEN)?;
    let project_id = normalize_id(&draft.project_id);
    if project_id.is_empty() {
        return Err(ValidationError::Required { field: "Project" });
    }
    let priority = parse_clearable(draft.priority.as_deref(), parse_priority)?.flatten();
    let deadline = parse_clearable(draft.deadline.as_deref(), parse_date)?.flatten();

    Ok(NewTask {
        title,
        description,
        project_id,
        is_urgent: draft.is_urgent,
        is_important: draft.is_important,
        priority,
        deadline,
    })
}

pub fn validate_new_project(
    name: &str,
    description: Option<&str>,
) -> Result<NewProject, ValidationError> {
    Ok(NewProject {
        name: required_text("Project name", name, MAX_PROJECT_NAME_LEN)?,
        description: optional_text("Description", description, MAX_PROJECT_DESCRIPTION_LEN)?,
    })
}

/// Check a stored task against the length rules
pub fn check_task(task: &Task) -> Result<(), ValidationError> {
    if task.title.trim().is_empty() {
        return Err(ValidationError::Required { field: "Title" });
    }
    check_len("Title", &task.title, MAX_TITLE_LEN)?;
    if let Some(description) = &task.description {
        check_len("Description", description, MAX_DESCRIPTION_LEN)?;
    }
    if task.project_id.trim().is_empty() {
        return Err(ValidationError::Required { field: "Project" });
    }
    Ok(())
}

pub fn check_project(project: &Project) -> Result<(), ValidationError> {
    if project.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "Project name",
        });
    }
    check_len("Project name", &project.name, MAX_PROJECT_NAME_LEN)?;
    if let Some(description) = &project.description {
        check_len("Description", description, MAX_PROJECT_DESCRIPTION_LEN)?;
    }
    Ok(())
}

pub fn check_checklist_item(item: &ChecklistItem) -> Result<(), ValidationError> {
    if item.title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "Item title",
        });
    }
    check_len("Item title", &item.title, MAX_TITLE_LEN)
}

/// Format an error message for an unknown project with the available projects
pub fn format_invalid_project_error(project_id: &str, data: &MatrixData) -> String {
    let projects = data.projects();
    if projects.is_empty() {
        format!(
            "Project '{}' does not exist. No projects have been created yet. Create one first using add_project().",
            project_id
        )
    } else {
        let project_list: Vec<String> = projects
            .iter()
            .map(|p| format!("{} ({})", p.id, p.name))
            .collect();
        format!(
            "Project '{}' does not exist.\nAvailable projects: {}",
            project_id,
            project_list.join(", ")
        )
    }
}
