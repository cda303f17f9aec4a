//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use qdo::QdoServerHandler;
use qdo::matrix::{Priority, Task, TaskStatus};
use tempfile::NamedTempFile;

/// Create a test handler with temporary storage
pub fn get_test_handler() -> (QdoServerHandler, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let handler = QdoServerHandler::new(temp_file.path()).unwrap();
    (handler, temp_file)
}

/// Extract the ID from a creation response
/// Response format: "Task created with ID: <id> (quadrant: ...)"
pub fn extract_id_from_response(response: &str) -> String {
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

fn timestamp(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc)
}

/// Create a test task with minimal fields
pub fn create_test_task(id: &str, is_urgent: bool, is_important: bool) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {}", id),
        description: None,
        project_id: "p-1".to_string(),
        is_urgent,
        is_important,
        priority: None,
        status: TaskStatus::Todo,
        deadline: None,
        created_at: timestamp("2025-06-01T08:00:00Z"),
        updated_at: timestamp("2025-06-01T08:00:00Z"),
    }
}

/// Create a test task with priority and deadline
pub fn create_full_test_task(
    id: &str,
    is_urgent: bool,
    is_important: bool,
    priority: Option<Priority>,
    deadline: Option<NaiveDate>,
) -> Task {
    Task {
        priority,
        deadline,
        ..create_test_task(id, is_urgent, is_important)
    }
}

/// Add a project through the handler and return its ID
pub async fn add_project(handler: &QdoServerHandler, name: &str) -> String {
    let response = handler
        .handle_add_project(name.to_string(), None)
        .await
        .unwrap();
    extract_id_from_response(&response)
}

/// Add a task through the handler and return its ID
pub async fn add_task(
    handler: &QdoServerHandler,
    title: &str,
    project_id: &str,
    is_urgent: bool,
    is_important: bool,
) -> String {
    let response = handler
        .handle_add_task(
            title.to_string(),
            project_id.to_string(),
            is_urgent,
            is_important,
            None,
            None,
            None,
        )
        .await
        .unwrap();
    extract_id_from_response(&response)
}
