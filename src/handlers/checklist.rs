//! Checklist handlers for the Qdo MCP server

use super::store_error;
use crate::formatting;
use crate::matrix::{MAX_TITLE_LEN, StoreError, summarize};
use crate::validation::{self, invalid_params};
use crate::{Mutation, QdoServerHandler};
use chrono::Utc;
use mcp_attr::{Result as McpResult, bail_public};
use tracing::info;

impl QdoServerHandler {
    pub async fn handle_checklist(&self, task_id: String) -> McpResult<String> {
        let task_id = validation::normalize_id(&task_id);
        let data = self.lock_data();
        let Some(task) = data.find_task(&task_id) else {
            return Err(store_error(StoreError::TaskNotFound(task_id), &data));
        };
        Ok(formatting::format_checklist(task, &data.checklist_for(&task.id)))
    }

    /// Append items to a task's checklist in the given order
    pub async fn handle_checklist_add(
        &self,
        task_id: String,
        titles: Vec<String>,
    ) -> McpResult<String> {
        let task_id = validation::normalize_id(&task_id);
        let titles = titles
            .iter()
            .map(|t| validation::required_text("Item title", t, MAX_TITLE_LEN))
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid_params)?;
        if titles.is_empty() {
            bail_public!(_, "No titles provided. Please specify at least one checklist item.");
        }

        let (created, badge) = self.commit("checklist_add", |data| {
            match data.add_checklist_items(&task_id, titles, Utc::now()) {
                Ok(created) => {
                    let badge = summarize(data.checklist_for(&task_id)).badge();
                    Ok(Mutation::Changed((created, badge)))
                }
                Err(e) => Err(store_error(e, data)),
            }
        })?;

        info!(task_id = %task_id, added = created.len(), "checklist items added");
        let mut result = format!("Added {} checklist item(s):\n", created.len());
        for item in &created {
            result.push_str(&format!("- {} (id: {})\n", item.title, item.id));
        }
        if let Some(badge) = badge {
            result.push_str(&format!("Progress: {}", badge));
        }
        Ok(result)
    }

    pub async fn handle_checklist_toggle(&self, id: String, completed: bool) -> McpResult<String> {
        let id = validation::normalize_id(&id);

        let (item, badge) = self.commit("checklist_toggle", |data| {
            match data.set_checklist_completed(&id, completed, Utc::now()) {
                Ok(item) => {
                    let badge = summarize(data.checklist_for(&item.task_id)).badge();
                    Ok(Mutation::Changed((item, badge)))
                }
                Err(e) => Err(store_error(e, data)),
            }
        })?;

        info!(item_id = %item.id, completed, "checklist item toggled");
        Ok(format!(
            "Checklist item {} {} ({})",
            item.title,
            if item.is_completed {
                "checked"
            } else {
                "unchecked"
            },
            badge.unwrap_or_default()
        ))
    }

    pub async fn handle_checklist_remove(&self, id: String) -> McpResult<String> {
        let id = validation::normalize_id(&id);

        let item = self.commit("checklist_remove", |data| {
            match data.remove_checklist_item(&id) {
                Ok(item) => Ok(Mutation::Changed(item)),
                Err(e) => Err(store_error(e, data)),
            }
        })?;

        info!(item_id = %item.id, task_id = %item.task_id, "checklist item removed");
        Ok(format!("Checklist item removed: {} (id: {})", item.title, item.id))
    }

    /// Reorder a checklist; `ids` must list every item of the task once
    pub async fn handle_checklist_reorder(
        &self,
        task_id: String,
        ids: Vec<String>,
    ) -> McpResult<String> {
        let task_id = validation::normalize_id(&task_id);
        let ids: Vec<String> = ids.iter().map(|id| validation::normalize_id(id)).collect();

        let result = self.commit("checklist_reorder", |data| {
            match data.reorder_checklist(&task_id, &ids, Utc::now()) {
                Ok(_) => {
                    let Some(task) = data.find_task(&task_id) else {
                        return Err(invalid_params(StoreError::TaskNotFound(task_id.clone())));
                    };
                    Ok(Mutation::Changed(formatting::format_checklist(
                        task,
                        &data.checklist_for(&task_id),
                    )))
                }
                Err(e) => Err(store_error(e, data)),
            }
        })?;

        info!(task_id = %task_id, items = ids.len(), "checklist reordered");
        Ok(result)
    }
}
