//! Qdo MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for task
//! management with the Eisenhower Matrix: every task is urgent or not,
//! important or not, and lands in one of four quadrants.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `QdoServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `matrix` module - Pure classification, filtering and
//!   reassignment logic plus the record container
//! - **Persistence Layer**: `storage` module - The `Persistence` seam and
//!   file-based TOML storage
//!
//! # Example
//!
//! ```no_run
//! use qdo::QdoServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = QdoServerHandler::new("qdo.toml")?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod formatting;
mod handlers;
pub mod matrix;
pub mod storage;
pub mod validation;

use anyhow::Result;
use mcp_attr::Result as McpResult;
use mcp_attr::bail_public;
use mcp_attr::server::{McpServer, mcp_server};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

// Re-export commonly used types
pub use matrix::{
    ChecklistItem, MatrixData, Priority, Project, Quadrant, Task, TaskFilters, TaskStatus,
};
pub use storage::{Persistence, Storage};

/// Result of a mutation run by [`QdoServerHandler::commit`]
pub(crate) enum Mutation<T> {
    /// Data changed and must be persisted
    Changed(T),
    /// Nothing to write
    Unchanged(T),
}

/// MCP Server handler for Eisenhower Matrix task management
///
/// Holds the current records in memory and writes every change through the
/// injected [`Persistence`] before it becomes visible.
pub struct QdoServerHandler {
    pub(crate) data: Mutex<MatrixData>,
    pub(crate) persistence: Box<dyn Persistence>,
}

impl QdoServerHandler {
    /// Create a handler backed by a TOML data file
    ///
    /// # Arguments
    /// * `storage_path` - Path to the data file (created on first save)
    ///
    /// # Example
    /// ```no_run
    /// # use qdo::QdoServerHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = QdoServerHandler::new("qdo.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: impl AsRef<Path>) -> Result<Self> {
        Self::with_persistence(Box::new(Storage::new(storage_path)))
    }

    /// Create a handler with an explicit persistence backend
    pub fn with_persistence(persistence: Box<dyn Persistence>) -> Result<Self> {
        let data = persistence.load()?;
        info!(
            projects = data.projects().len(),
            tasks = data.tasks().len(),
            "loaded matrix data"
        );
        Ok(Self {
            data: Mutex::new(data),
            persistence,
        })
    }

    /// Copy of the current records
    pub fn snapshot(&self) -> MatrixData {
        self.lock_data().clone()
    }

    pub(crate) fn lock_data(&self) -> MutexGuard<'_, MatrixData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a mutation atomically
    ///
    /// The mutation runs against a copy. The copy replaces the live data only
    /// after it has been saved, so a failed mutation or a failed save leaves
    /// the visible state untouched.
    pub(crate) fn commit<T>(
        &self,
        action: &str,
        mutate: impl FnOnce(&mut MatrixData) -> McpResult<Mutation<T>>,
    ) -> McpResult<T> {
        let mut data = self.lock_data();
        let mut draft = data.clone();

        let value = match mutate(&mut draft)? {
            Mutation::Unchanged(value) => return Ok(value),
            Mutation::Changed(value) => value,
        };

        if let Err(e) = self.persistence.save(&draft) {
            warn!(action, error = %e, "save failed, change discarded");
            bail_public!(_, "Failed to save: {}", e);
        }
        *data = draft;
        info!(action, "saved");
        Ok(value)
    }

    /// Extract ID from response message
    ///
    /// Helper function for tests to extract the ID from creation messages.
    /// Response format: "Task created with ID: <id> (quadrant: ...)"
    #[cfg(test)]
    pub(crate) fn extract_id_from_response(response: &str) -> String {
        if let Some(start) = response.find("ID: ") {
            let id_part = &response[start + 4..];
            if let Some(end) = id_part.find(" (") {
                return id_part[..end].trim().to_string();
            }
        }
        response
            .split_whitespace()
            .last()
            .unwrap_or("")
            .trim_end_matches(')')
            .to_string()
    }
}

/// Eisenhower Matrix task management server.
///
/// Every task is placed by two flags into one of four quadrants:
/// - **urgent-important** (Do First): crises, deadlines
/// - **not-urgent-important** (Schedule): planning, growth
/// - **urgent-not-important** (Delegate): interruptions, some requests
/// - **not-urgent-not-important** (Eliminate): time wasters
///
/// Tasks belong to projects and carry a status (todo, in_progress, blocked,
/// done), an optional priority (must_have, nice_to_have), an optional deadline
/// and an optional checklist.
///
/// IDs are generated by the server (UUIDs). Create a project before adding tasks.
#[mcp_server]
impl McpServer for QdoServerHandler {
    /// **Create project**: Group tasks under a named project. Tasks require a project.
    #[tool]
    async fn add_project(
        &self,
        /// Name: up to 100 characters
        name: String,
        /// Description: up to 500 characters (optional)
        description: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_project(name, description).await
    }

    /// **Edit project**: Rename or redescribe a project. Use "" to clear the description.
    #[tool]
    async fn update_project(
        &self,
        /// ID of project to update
        id: String,
        /// New name (optional)
        name: Option<String>,
        /// New description, ""=clear (optional)
        description: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_project(id, name, description).await
    }

    /// **Delete project**: Removes the project only. Its tasks are kept and shown under "unknown project".
    #[tool]
    async fn delete_project(
        &self,
        /// ID of project to delete
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_project(id).await
    }

    /// **List projects**: All projects with their task counts.
    #[tool]
    async fn projects(&self) -> McpResult<String> {
        self.handle_projects().await
    }

    /// **Capture task**: Add a task to the matrix. Its quadrant comes from is_urgent and is_important. Status starts as todo.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn add_task(
        &self,
        /// Title: brief description, up to 200 characters
        title: String,
        /// Project ID the task belongs to
        project_id: String,
        /// Urgent: needs attention soon
        is_urgent: bool,
        /// Important: contributes to long-term goals
        is_important: bool,
        /// Description: Markdown details, up to 5000 characters (optional)
        description: Option<String>,
        /// Priority: must_have/nice_to_have (optional)
        priority: Option<String>,
        /// Deadline: YYYY-MM-DD (optional)
        deadline: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_task(
            title,
            project_id,
            is_urgent,
            is_important,
            description,
            priority,
            deadline,
        )
        .await
    }

    /// **Edit task**: Update task details. Use "" to clear optional fields. Use move_task to change quadrant.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn update_task(
        &self,
        /// ID of task to update
        id: String,
        /// New title (optional)
        title: Option<String>,
        /// Description in Markdown, ""=clear (optional)
        description: Option<String>,
        /// Project ID (optional)
        project_id: Option<String>,
        /// Priority must_have/nice_to_have, ""=clear (optional)
        priority: Option<String>,
        /// Deadline YYYY-MM-DD, ""=clear (optional)
        deadline: Option<String>,
        /// Status todo/in_progress/blocked/done (optional)
        status: Option<String>,
    ) -> McpResult<String> {
        self.handle_update_task(id, title, description, project_id, priority, deadline, status)
            .await
    }

    /// **Change status**: Move one or more tasks to todo/in_progress/blocked/done. Any transition is allowed.
    #[tool]
    async fn change_status(
        &self,
        /// Task IDs to change
        ids: Vec<String>,
        /// New status: todo/in_progress/blocked/done
        status: String,
    ) -> McpResult<String> {
        self.handle_change_status(ids, status).await
    }

    /// **Move task**: Drop a task into another quadrant. Only urgency and importance change; moving into the current quadrant writes nothing.
    #[tool]
    async fn move_task(
        &self,
        /// ID of task to move
        id: String,
        /// Target: urgent-important/urgent-not-important/not-urgent-important/not-urgent-not-important
        quadrant: String,
    ) -> McpResult<String> {
        self.handle_move_task(id, quadrant).await
    }

    /// **Delete task**: Permanently remove a task and its checklist.
    #[tool]
    async fn delete_task(
        &self,
        /// ID of task to delete
        id: String,
    ) -> McpResult<String> {
        self.handle_delete_task(id).await
    }

    /// **View matrix**: Tasks grouped into the four quadrants, must_have first in each.
    /// **Filters**: comma-separated values; empty=no constraint. All filters combine with AND, values within a filter with OR.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn list(
        &self,
        /// Search: case-insensitive text in title or description (optional)
        search: Option<String>,
        /// Status filter: todo,in_progress,blocked,done (optional)
        status: Option<String>,
        /// Deadline filter: overdue,today,this-week,this-month,no-deadline (optional)
        deadline: Option<String>,
        /// Priority filter: must_have,nice_to_have (optional)
        priority: Option<String>,
        /// Project IDs to include (optional)
        projects: Option<String>,
        /// Omit task descriptions from output (optional)
        exclude_description: Option<bool>,
    ) -> McpResult<String> {
        self.handle_list(
            search,
            status,
            deadline,
            priority,
            projects,
            exclude_description,
        )
        .await
    }

    /// **View checklist**: Checklist items of a task in order, with progress.
    #[tool]
    async fn checklist(
        &self,
        /// Task ID
        task_id: String,
    ) -> McpResult<String> {
        self.handle_checklist(task_id).await
    }

    /// **Add checklist items**: Append one or more steps to a task's checklist.
    #[tool]
    async fn checklist_add(
        &self,
        /// Task ID
        task_id: String,
        /// Item titles, up to 200 characters each
        titles: Vec<String>,
    ) -> McpResult<String> {
        self.handle_checklist_add(task_id, titles).await
    }

    /// **Check/uncheck item**: Set completion of a checklist item.
    #[tool]
    async fn checklist_toggle(
        &self,
        /// Checklist item ID
        id: String,
        /// Completed flag
        completed: bool,
    ) -> McpResult<String> {
        self.handle_checklist_toggle(id, completed).await
    }

    /// **Remove checklist item**: Delete one checklist item.
    #[tool]
    async fn checklist_remove(
        &self,
        /// Checklist item ID
        id: String,
    ) -> McpResult<String> {
        self.handle_checklist_remove(id).await
    }

    /// **Reorder checklist**: Give every item ID of the task in the desired order.
    #[tool]
    async fn checklist_reorder(
        &self,
        /// Task ID
        task_id: String,
        /// All checklist item IDs of the task, in new order
        ids: Vec<String>,
    ) -> McpResult<String> {
        self.handle_checklist_reorder(task_id, ids).await
    }

    /// **Progress**: Completion statistics and today's focus task (most pressing urgent & important task).
    #[tool]
    async fn stats(
        &self,
        /// Project IDs to include, comma-separated (optional)
        projects: Option<String>,
    ) -> McpResult<String> {
        self.handle_stats(projects).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tempfile::NamedTempFile;

    fn get_test_handler() -> (QdoServerHandler, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let handler = QdoServerHandler::new(temp_file.path()).unwrap();
        (handler, temp_file)
    }

    /// In-memory persistence whose saves can be switched to fail
    struct FlakyPersistence {
        fail: Arc<AtomicBool>,
    }

    impl Persistence for FlakyPersistence {
        fn load(&self) -> Result<MatrixData> {
            Ok(MatrixData::new())
        }

        fn save(&self, _data: &MatrixData) -> Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                Err(anyhow!("disk full"))
            } else {
                Ok(())
            }
        }
    }

    async fn add_project(handler: &QdoServerHandler) -> String {
        let response = handler
            .handle_add_project("Home".to_string(), None)
            .await
            .unwrap();
        QdoServerHandler::extract_id_from_response(&response)
    }

    async fn add_task(handler: &QdoServerHandler, project_id: &str, urgent: bool) -> String {
        let response = handler
            .handle_add_task(
                "Fix sink".to_string(),
                project_id.to_string(),
                urgent,
                true,
                None,
                None,
                None,
            )
            .await
            .unwrap();
        QdoServerHandler::extract_id_from_response(&response)
    }

    #[test]
    fn test_custom_file_path() {
        let temp_file = NamedTempFile::new().unwrap();
        let handler = QdoServerHandler::new(temp_file.path()).unwrap();
        assert!(handler.snapshot().tasks().is_empty());
    }

    #[tokio::test]
    async fn test_changes_survive_reload() {
        let (handler, temp_file) = get_test_handler();
        let project_id = add_project(&handler).await;
        let task_id = add_task(&handler, &project_id, true).await;

        let reloaded = QdoServerHandler::new(temp_file.path()).unwrap();
        let data = reloaded.snapshot();
        assert_eq!(data.find_task(&task_id).unwrap().title, "Fix sink");
        assert_eq!(data.find_project(&project_id).unwrap().name, "Home");
    }

    #[tokio::test]
    async fn test_failed_save_leaves_state_unchanged() {
        let fail = Arc::new(AtomicBool::new(false));
        let handler = QdoServerHandler::with_persistence(Box::new(FlakyPersistence {
            fail: fail.clone(),
        }))
        .unwrap();
        let project_id = add_project(&handler).await;
        let task_id = add_task(&handler, &project_id, true).await;

        fail.store(true, Ordering::SeqCst);
        let result = handler
            .handle_move_task(task_id.clone(), "not-urgent-not-important".to_string())
            .await;
        assert!(result.is_err());

        let data = handler.snapshot();
        let task = data.find_task(&task_id).unwrap();
        assert!(task.is_urgent);
        assert!(task.is_important);
    }

    #[tokio::test]
    async fn test_noop_move_does_not_save() {
        let fail = Arc::new(AtomicBool::new(false));
        let handler = QdoServerHandler::with_persistence(Box::new(FlakyPersistence {
            fail: fail.clone(),
        }))
        .unwrap();
        let project_id = add_project(&handler).await;
        let task_id = add_task(&handler, &project_id, true).await;
        let before = handler.snapshot().find_task(&task_id).unwrap().updated_at;

        // A save would fail now, so success proves nothing was written
        fail.store(true, Ordering::SeqCst);
        let result = handler
            .handle_move_task(task_id.clone(), "urgent-important".to_string())
            .await
            .unwrap();
        assert!(result.contains("already"));
        assert_eq!(
            handler.snapshot().find_task(&task_id).unwrap().updated_at,
            before
        );
    }
}
