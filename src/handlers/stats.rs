//! Progress statistics handler for the Qdo MCP server

use crate::QdoServerHandler;
use crate::formatting;
use crate::matrix::{Task, daily_focus, local_date_today, matches_projects, task_stats};
use crate::validation;
use mcp_attr::Result as McpResult;

impl QdoServerHandler {
    /// Completion counts and today's focus task, optionally scoped to projects
    pub async fn handle_stats(&self, projects: Option<String>) -> McpResult<String> {
        let projects = validation::parse_id_list(projects.as_deref());

        let data = self.lock_data();
        let tasks: Vec<&Task> = data
            .tasks()
            .iter()
            .filter(|t| matches_projects(t, &projects))
            .collect();

        let stats = task_stats(&tasks, local_date_today());
        let focus = daily_focus(&tasks);
        Ok(formatting::format_stats(&stats, focus, &data))
    }
}
