//! Change status handler for the Qdo MCP server

use crate::matrix::{StoreError, TaskPatch};
use crate::validation::{self, invalid_params};
use crate::{Mutation, QdoServerHandler};
use chrono::Utc;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::info;

impl QdoServerHandler {
    /// Move tasks through todo/in_progress/blocked/done.
    /// **Batch**: Unknown IDs are reported but do not stop the others.
    pub async fn handle_change_status(
        &self,
        ids: Vec<String>,
        new_status: String,
    ) -> McpResult<String> {
        // Normalize all IDs upfront, dropping blanks
        let normalized_ids: Vec<String> = ids
            .iter()
            .map(|id| validation::normalize_id(id))
            .filter(|id| !id.is_empty())
            .collect();
        if normalized_ids.is_empty() {
            bail_public!(_, "No IDs provided. Please specify at least one task ID.");
        }

        let status = validation::parse_status(&new_status).map_err(invalid_params)?;
        let patch = TaskPatch::status(status);

        let (successes, failures) = self.commit("change_status", |data| {
            let now = Utc::now();
            let mut successes = Vec::new();
            let mut failures = Vec::new();

            for id in &normalized_ids {
                let old_status = match data.find_task(id) {
                    Some(task) => task.status,
                    None => {
                        failures.push(StoreError::TaskNotFound(id.clone()).to_string());
                        continue;
                    }
                };
                match data.update_task(id, &patch, now) {
                    Ok(task) => successes.push(format!(
                        "[{}] {}: {} → {}",
                        task.id, task.title, old_status, task.status
                    )),
                    Err(e) => failures.push(e.to_string()),
                }
            }

            if successes.is_empty() {
                bail_public!(_, "Failed to change status:\n{}", failures.join("\n"));
            }
            Ok(Mutation::Changed((successes, failures)))
        })?;

        info!(
            status = %status,
            changed = successes.len(),
            failed = failures.len(),
            "status changed"
        );

        let mut result = format!(
            "Changed status of {} task(s) to {}:\n{}",
            successes.len(),
            status,
            successes.join("\n")
        );
        if !failures.is_empty() {
            result.push_str(&format!(
                "\n\nFailed {} task(s):\n{}",
                failures.len(),
                failures.join("\n")
            ));
        }
        Ok(result)
    }
}
