//! List handler for the Qdo MCP server

use crate::QdoServerHandler;
use crate::formatting;
use crate::matrix::{
    Quadrant, Task, TaskFilters, group_by_quadrant, local_date_today, sort_by_priority,
};
use crate::validation::{self, invalid_params};
use mcp_attr::Result as McpResult;
use tracing::debug;

impl QdoServerHandler {
    /// Filter tasks, group them into quadrants and sort each quadrant by priority.
    pub async fn handle_list(
        &self,
        search: Option<String>,
        status: Option<String>,
        deadline: Option<String>,
        priority: Option<String>,
        projects: Option<String>,
        exclude_description: Option<bool>,
    ) -> McpResult<String> {
        let filters = TaskFilters {
            search: search.unwrap_or_default(),
            status: validation::parse_selection(status.as_deref()).map_err(invalid_params)?,
            deadline: validation::parse_deadline_selection(deadline.as_deref())
                .map_err(invalid_params)?,
            priority: validation::parse_selection(priority.as_deref()).map_err(invalid_params)?,
            projects: validation::parse_id_list(projects.as_deref()),
        };

        let data = self.lock_data();
        let mut tasks: Vec<&Task> = data.tasks().iter().collect();
        filters.apply(&mut tasks, local_date_today());
        debug!(matched = tasks.len(), total = data.tasks().len(), "list filtered");

        let mut grouped = group_by_quadrant(tasks);
        for quadrant in Quadrant::ALL {
            sort_by_priority(grouped.get_mut(quadrant));
        }

        Ok(formatting::format_matrix(
            &grouped,
            &data,
            exclude_description.unwrap_or(false),
        ))
    }
}
