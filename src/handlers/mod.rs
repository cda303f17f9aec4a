//! MCP tool handlers for the Qdo server
//!
//! This module contains the implementation of all MCP tool handlers.
//! Each group of tools lives in a separate file.

pub mod change_status;
pub mod checklist;
pub mod list;
pub mod move_task;
pub mod projects;
pub mod stats;
pub mod tasks;

use crate::matrix::{MatrixData, StoreError};
use crate::validation::{format_invalid_project_error, invalid_params};

/// Convert a lookup failure into a client-visible error
///
/// Unknown projects are reported together with the projects that do exist.
pub(crate) fn store_error(err: StoreError, data: &MatrixData) -> mcp_attr::Error {
    match err {
        StoreError::ProjectNotFound(id) => invalid_params(format_invalid_project_error(&id, data)),
        other => invalid_params(other),
    }
}
