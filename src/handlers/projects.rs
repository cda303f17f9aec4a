//! Project handlers for the Qdo MCP server

use super::store_error;
use crate::formatting;
use crate::matrix::{MAX_PROJECT_DESCRIPTION_LEN, MAX_PROJECT_NAME_LEN, ProjectPatch};
use crate::validation::{self, invalid_params};
use crate::{Mutation, QdoServerHandler};
use chrono::Utc;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::info;

impl QdoServerHandler {
    pub async fn handle_add_project(
        &self,
        name: String,
        description: Option<String>,
    ) -> McpResult<String> {
        let input = validation::validate_new_project(&name, description.as_deref())
            .map_err(invalid_params)?;

        let project = self.commit("add_project", |data| {
            Ok(Mutation::Changed(data.add_project(input, Utc::now())))
        })?;

        info!(project_id = %project.id, "project created");
        Ok(format!(
            "Project created with ID: {} (name: {})",
            project.id, project.name
        ))
    }

    /// Rename a project or change its description; `""` clears the description
    pub async fn handle_update_project(
        &self,
        id: String,
        name: Option<String>,
        description: Option<String>,
    ) -> McpResult<String> {
        let id = validation::normalize_id(&id);
        let patch = ProjectPatch {
            name: name
                .as_deref()
                .map(|n| validation::required_text("Project name", n, MAX_PROJECT_NAME_LEN))
                .transpose()
                .map_err(invalid_params)?,
            description: validation::parse_clearable(description.as_deref(), |d| {
                validation::required_text("Description", d, MAX_PROJECT_DESCRIPTION_LEN)
            })
            .map_err(invalid_params)?,
        };
        if patch == ProjectPatch::default() {
            bail_public!(_, "No fields to update. Provide name or description.");
        }

        let project = self.commit("update_project", |data| {
            match data.update_project(&id, &patch, Utc::now()) {
                Ok(project) => Ok(Mutation::Changed(project)),
                Err(e) => Err(store_error(e, data)),
            }
        })?;

        info!(project_id = %project.id, "project updated");
        Ok(format!("Project updated: {} ({})", project.id, project.name))
    }

    /// Delete a project; its tasks stay and are reported as orphaned
    pub async fn handle_delete_project(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id);

        let (project, orphaned) = self.commit("delete_project", |data| {
            match data.remove_project(&id) {
                Ok(project) => {
                    let orphaned = data.task_count_for_project(&project.id);
                    Ok(Mutation::Changed((project, orphaned)))
                }
                Err(e) => Err(store_error(e, data)),
            }
        })?;

        info!(project_id = %project.id, orphaned, "project deleted");
        let mut result = format!("Project deleted: {} ({})", project.id, project.name);
        if orphaned > 0 {
            result.push_str(&format!(
                "\n{} task(s) still reference it and are shown under \"unknown project\"",
                orphaned
            ));
        }
        Ok(result)
    }

    pub async fn handle_projects(&self) -> McpResult<String> {
        let data = self.lock_data();
        Ok(formatting::format_projects(&data))
    }
}

#[cfg(test)]
mod tests {
    use crate::QdoServerHandler;
    use tempfile::NamedTempFile;

    fn get_test_handler() -> (QdoServerHandler, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let handler = QdoServerHandler::new(temp_file.path()).unwrap();
        (handler, temp_file)
    }

    #[tokio::test]
    async fn test_add_and_list_projects() {
        let (handler, _temp_file) = get_test_handler();
        let response = handler
            .handle_add_project("Work".to_string(), Some("Day job".to_string()))
            .await
            .unwrap();
        let id = QdoServerHandler::extract_id_from_response(&response);

        let listing = handler.handle_projects().await.unwrap();
        assert!(listing.contains(&id));
        assert!(listing.contains("Work (0 task(s))"));
        assert!(listing.contains("Description: Day job"));
    }

    #[tokio::test]
    async fn test_add_project_rejects_blank_name() {
        let (handler, _temp_file) = get_test_handler();
        assert!(
            handler
                .handle_add_project("   ".to_string(), None)
                .await
                .is_err()
        );
        assert!(handler.snapshot().projects().is_empty());
    }

    #[tokio::test]
    async fn test_update_project_clears_description() {
        let (handler, _temp_file) = get_test_handler();
        let response = handler
            .handle_add_project("Work".to_string(), Some("Day job".to_string()))
            .await
            .unwrap();
        let id = QdoServerHandler::extract_id_from_response(&response);

        handler
            .handle_update_project(id.clone(), Some("Office".to_string()), Some(String::new()))
            .await
            .unwrap();

        let data = handler.snapshot();
        let project = data.find_project(&id).unwrap();
        assert_eq!(project.name, "Office");
        assert_eq!(project.description, None);
    }

    #[tokio::test]
    async fn test_update_project_requires_fields() {
        let (handler, _temp_file) = get_test_handler();
        let response = handler
            .handle_add_project("Work".to_string(), None)
            .await
            .unwrap();
        let id = QdoServerHandler::extract_id_from_response(&response);
        assert!(handler.handle_update_project(id, None, None).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_project_keeps_tasks() {
        let (handler, _temp_file) = get_test_handler();
        let response = handler
            .handle_add_project("Work".to_string(), None)
            .await
            .unwrap();
        let project_id = QdoServerHandler::extract_id_from_response(&response);
        handler
            .handle_add_task(
                "Write report".to_string(),
                project_id.clone(),
                false,
                true,
                None,
                None,
                None,
            )
            .await
            .unwrap();

        let result = handler.handle_delete_project(project_id).await.unwrap();
        assert!(result.contains("1 task(s) still reference it"));

        let data = handler.snapshot();
        assert!(data.projects().is_empty());
        assert_eq!(data.tasks().len(), 1);
        assert_eq!(data.orphaned_tasks().len(), 1);

        let listing = handler.handle_projects().await.unwrap();
        assert!(listing.contains("1 task(s) reference a deleted project"));
    }

    #[tokio::test]
    async fn test_delete_unknown_project() {
        let (handler, _temp_file) = get_test_handler();
        assert!(
            handler
                .handle_delete_project("missing".to_string())
                .await
                .is_err()
        );
    }
}
