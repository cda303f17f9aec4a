//! Quadrant move handler for the Qdo MCP server

use super::store_error;
use crate::matrix::{QuadrantMove, StoreError, TaskPatch, plan_quadrant_move};
use crate::validation::{self, invalid_params};
use crate::{Mutation, QdoServerHandler};
use chrono::Utc;
use mcp_attr::Result as McpResult;
use tracing::info;

impl QdoServerHandler {
    /// Reassign a task to another quadrant
    ///
    /// Urgency and importance are written together. Moving a task into the
    /// quadrant it already occupies leaves the record and the data file
    /// untouched.
    pub async fn handle_move_task(&self, id: String, quadrant: String) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        let target = validation::parse_quadrant(&quadrant).map_err(invalid_params)?;

        self.commit("move_task", |data| {
            let Some(task) = data.find_task(&id) else {
                return Err(store_error(StoreError::TaskNotFound(id.clone()), data));
            };

            match plan_quadrant_move(task, target) {
                QuadrantMove::Unchanged => Ok(Mutation::Unchanged(format!(
                    "Task [{}] is already in {} ({})",
                    task.id,
                    target,
                    target.action()
                ))),
                QuadrantMove::Move { from, patch } => {
                    let task = data
                        .update_task(&id, &TaskPatch::from(patch), Utc::now())
                        .map_err(invalid_params)?;
                    info!(task_id = %task.id, %from, to = %target, "task moved");
                    Ok(Mutation::Changed(format!(
                        "Task [{}] {} moved: {} → {} ({})",
                        task.id,
                        task.title,
                        from,
                        target,
                        target.action()
                    )))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::QdoServerHandler;
    use crate::matrix::{Quadrant, TaskStatus, classify};
    use tempfile::NamedTempFile;

    async fn setup(
        is_urgent: bool,
        is_important: bool,
    ) -> (QdoServerHandler, NamedTempFile, String) {
        let temp_file = NamedTempFile::new().unwrap();
        let handler = QdoServerHandler::new(temp_file.path()).unwrap();
        let response = handler
            .handle_add_project("Home".to_string(), None)
            .await
            .unwrap();
        let project_id = QdoServerHandler::extract_id_from_response(&response);
        let response = handler
            .handle_add_task(
                "Call plumber".to_string(),
                project_id,
                is_urgent,
                is_important,
                None,
                None,
                None,
            )
            .await
            .unwrap();
        let task_id = QdoServerHandler::extract_id_from_response(&response);
        (handler, temp_file, task_id)
    }

    #[tokio::test]
    async fn test_move_sets_both_flags() {
        let (handler, _temp_file, id) = setup(false, true).await;
        let result = handler
            .handle_move_task(id.clone(), "urgent-not-important".to_string())
            .await
            .unwrap();
        assert!(result.contains("not-urgent-important → urgent-not-important"));

        let data = handler.snapshot();
        let task = data.find_task(&id).unwrap();
        assert!(task.is_urgent);
        assert!(!task.is_important);
        assert_eq!(classify(task), Quadrant::UrgentNotImportant);
    }

    #[tokio::test]
    async fn test_move_into_same_quadrant_is_noop() {
        let (handler, _temp_file, id) = setup(true, true).await;
        let before = handler.snapshot();

        let result = handler
            .handle_move_task(id.clone(), "urgent-important".to_string())
            .await
            .unwrap();

        assert!(result.contains("already in urgent-important"));
        assert_eq!(handler.snapshot(), before);
    }

    #[tokio::test]
    async fn test_move_done_task() {
        let (handler, _temp_file, id) = setup(true, true).await;
        handler
            .handle_change_status(vec![id.clone()], "done".to_string())
            .await
            .unwrap();

        handler
            .handle_move_task(id.clone(), "not-urgent-not-important".to_string())
            .await
            .unwrap();

        let data = handler.snapshot();
        let task = data.find_task(&id).unwrap();
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(classify(task), Quadrant::NotUrgentNotImportant);
    }

    #[tokio::test]
    async fn test_move_invalid_input() {
        let (handler, _temp_file, id) = setup(true, true).await;
        assert!(
            handler
                .handle_move_task(id, "top-left".to_string())
                .await
                .is_err()
        );
        assert!(
            handler
                .handle_move_task("missing".to_string(), "urgent-important".to_string())
                .await
                .is_err()
        );
    }
}
