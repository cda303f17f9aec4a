//! Task create/update/delete handlers for the Qdo MCP server

use super::store_error;
use crate::matrix::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN, TaskPatch, classify};
use crate::validation::{self, TaskDraft, ValidationError, invalid_params};
use crate::{Mutation, QdoServerHandler};
use chrono::Utc;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::info;

impl QdoServerHandler {
    /// Capture a new task; its quadrant follows from the two flags
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_add_task(
        &self,
        title: String,
        project_id: String,
        is_urgent: bool,
        is_important: bool,
        description: Option<String>,
        priority: Option<String>,
        deadline: Option<String>,
    ) -> McpResult<String> {
        let input = validation::validate_new_task(TaskDraft {
            title,
            description,
            project_id,
            is_urgent,
            is_important,
            priority,
            deadline,
        })
        .map_err(invalid_params)?;

        let task = self.commit("add_task", |data| match data.add_task(input, Utc::now()) {
            Ok(task) => Ok(Mutation::Changed(task)),
            Err(e) => Err(store_error(e, data)),
        })?;

        let quadrant = classify(&task);
        info!(task_id = %task.id, %quadrant, "task created");
        Ok(format!(
            "Task created with ID: {} (quadrant: {}, {})",
            task.id,
            quadrant,
            quadrant.action()
        ))
    }

    /// Partially update a task; `""` clears description, priority or deadline
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_update_task(
        &self,
        id: String,
        title: Option<String>,
        description: Option<String>,
        project_id: Option<String>,
        priority: Option<String>,
        deadline: Option<String>,
        status: Option<String>,
    ) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        let patch = build_task_patch(title, description, project_id, priority, deadline, status)
            .map_err(invalid_params)?;
        if patch.is_empty() {
            bail_public!(
                _,
                "No fields to update. Provide title, description, project_id, priority, deadline or status."
            );
        }

        let task = self.commit("update_task", |data| {
            match data.update_task(&id, &patch, Utc::now()) {
                Ok(task) => Ok(Mutation::Changed(task)),
                Err(e) => Err(store_error(e, data)),
            }
        })?;

        info!(task_id = %task.id, "task updated");
        Ok(format!("Task updated: [{}] {}", task.id, task.title))
    }

    /// Permanently remove a task and its checklist
    pub async fn handle_delete_task(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id);

        let task = self.commit("delete_task", |data| match data.remove_task(&id) {
            Ok(task) => Ok(Mutation::Changed(task)),
            Err(e) => Err(store_error(e, data)),
        })?;

        info!(task_id = %task.id, "task deleted");
        Ok(format!("Task deleted: [{}] {}", task.id, task.title))
    }
}

fn build_task_patch(
    title: Option<String>,
    description: Option<String>,
    project_id: Option<String>,
    priority: Option<String>,
    deadline: Option<String>,
    status: Option<String>,
) -> Result<TaskPatch, ValidationError> {
    let project_id = match project_id.as_deref().map(validation::normalize_id) {
        Some(p) if p.is_empty() => return Err(ValidationError::Required { field: "Project" }),
        other => other,
    };

    Ok(TaskPatch {
        title: title
            .as_deref()
            .map(|t| validation::required_text("Title", t, MAX_TITLE_LEN))
            .transpose()?,
        description: validation::parse_clearable(description.as_deref(), |d| {
            validation::required_text("Description", d, MAX_DESCRIPTION_LEN)
        })?,
        project_id,
        priority: validation::parse_clearable(priority.as_deref(), validation::parse_priority)?,
        deadline: validation::parse_clearable(deadline.as_deref(), validation::parse_date)?,
        status: status
            .as_deref()
            .map(validation::parse_status)
            .transpose()?,
        ..TaskPatch::default()
    })
}
