//! Formatting helper functions for the Qdo MCP server
//!
//! This module renders matrices, checklists, projects and statistics as the
//! plain text returned by the tools.

use crate::matrix::{
    ChecklistItem, MatrixData, Project, Task, TaskStats, TasksByQuadrant, summarize,
};

/// Display name of a task's project, tolerating deleted projects
pub fn project_label(data: &MatrixData, project_id: &str) -> String {
    match data.find_project(project_id) {
        Some(project) => project.name.clone(),
        None => format!("unknown project ({})", project_id),
    }
}

/// Format a single task entry
///
/// # Arguments
/// * `task` - Task to format
/// * `data` - Matrix data used to resolve project names and checklists
/// * `exclude_description` - Whether to omit the Markdown description
pub fn format_task(task: &Task, data: &MatrixData, exclude_description: bool) -> String {
    let mut result = format!("- [{}] {} (status: {}", task.id, task.title, task.status);
    if let Some(priority) = task.priority {
        result.push_str(&format!(", priority: {}", priority));
    }
    result.push_str(")\n");

    result.push_str(&format!(
        "  Project: {}\n",
        project_label(data, &task.project_id)
    ));
    if let Some(deadline) = task.deadline {
        result.push_str(&format!("  Deadline: {}\n", deadline));
    }
    if let Some(badge) = summarize(data.checklist_for(&task.id)).badge() {
        result.push_str(&format!("  Checklist: {}\n", badge));
    }
    if !exclude_description && let Some(ref d) = task.description {
        result.push_str(&format!("  Description: {}\n", d));
    }
    result
}

/// Format tasks grouped by quadrant, one section per quadrant
pub fn format_matrix(
    grouped: &TasksByQuadrant<&Task>,
    data: &MatrixData,
    exclude_description: bool,
) -> String {
    if grouped.is_empty() {
        return "No tasks found".to_string();
    }

    let mut result = format!("Found {} task(s):\n", grouped.len());
    for (quadrant, tasks) in grouped.iter() {
        result.push_str(&format!(
            "\n## {} ({}) [{}]: {}\n",
            quadrant.title(),
            quadrant.action(),
            quadrant,
            tasks.len()
        ));
        for task in tasks {
            result.push_str(&format_task(task, data, exclude_description));
        }
    }
    result
}

pub fn format_checklist(task: &Task, items: &[&ChecklistItem]) -> String {
    let progress = summarize(items.iter().copied());
    let mut result = format!(
        "Checklist for [{}] {}: {}/{}{}\n",
        task.id,
        task.title,
        progress.completed,
        progress.total,
        if progress.is_fully_complete {
            " (complete)"
        } else {
            ""
        }
    );
    if items.is_empty() {
        result.push_str("No checklist items\n");
    }
    for item in items {
        result.push_str(&format!(
            "{}. [{}] {} (id: {})\n",
            u64::from(item.position) + 1,
            if item.is_completed { "x" } else { " " },
            item.title,
            item.id
        ));
    }
    result
}

pub fn format_projects(data: &MatrixData) -> String {
    let projects: &[Project] = data.projects();
    let orphaned = data.orphaned_tasks();
    if projects.is_empty() && orphaned.is_empty() {
        return "No projects found".to_string();
    }

    let mut result = format!("Found {} project(s):\n\n", projects.len());
    for project in projects {
        result.push_str(&format!(
            "- [{}] {} ({} task(s))\n",
            project.id,
            project.name,
            data.task_count_for_project(&project.id)
        ));
        if let Some(ref d) = project.description {
            result.push_str(&format!("  Description: {}\n", d));
        }
    }
    if !orphaned.is_empty() {
        result.push_str(&format!(
            "\n{} task(s) reference a deleted project\n",
            orphaned.len()
        ));
    }
    result
}

pub fn format_stats(stats: &TaskStats, focus: Option<&Task>, data: &MatrixData) -> String {
    let mut result = format!(
        "Done today: {}\nActive: {}\nCompleted: {}/{} ({}%)\nUrgent (active): {}\nImportant (active): {}\n",
        stats.completed_today,
        stats.active,
        stats.completed,
        stats.total,
        stats.completion_rate,
        stats.urgent_active,
        stats.important_active
    );

    match focus {
        Some(task) => {
            result.push_str("\nToday's focus (Do First):\n");
            result.push_str(&format_task(task, data, false));
        }
        None => result.push_str("\nToday's focus: none. No open urgent & important tasks.\n"),
    }
    result
}
