//! Eisenhower Matrix domain models and business logic
//!
//! Everything in this module is synchronous and free of I/O. It is split into
//! submodules:
//! - `model`: Task, Project and ChecklistItem records and their patches
//! - `quadrant`: quadrant classification and grouping
//! - `deadline`: overlapping deadline buckets
//! - `filter`: filter composition and priority sorting
//! - `reassign`: planning of quadrant moves
//! - `checklist`: checklist progress
//! - `stats`: progress statistics and the daily focus task
//! - `matrix_data`: the in-memory record container behind the server

mod checklist;
mod deadline;
mod filter;
mod matrix_data;
mod model;
mod quadrant;
mod reassign;
mod stats;

// Re-export all public types
pub use checklist::{ChecklistProgress, summarize};
pub use deadline::{
    DeadlineBucket, local_date_today, matches_any_bucket, matches_deadline_bucket, week_start,
};
pub use filter::{TaskFilters, apply_filters, matches_projects, matches_search, sort_by_priority};
pub use matrix_data::{FORMAT_VERSION, MatrixData, StoreError};
pub use model::{
    ChecklistItem, MAX_DESCRIPTION_LEN, MAX_PROJECT_DESCRIPTION_LEN, MAX_PROJECT_NAME_LEN,
    MAX_TITLE_LEN, NewProject, NewTask, Priority, Project, ProjectPatch, Task, TaskPatch,
    TaskStatus,
};
pub use quadrant::{Quadrant, TasksByQuadrant, classify, group_by_quadrant};
pub use reassign::{FlagPatch, QuadrantMove, plan_quadrant_move};
pub use stats::{TaskStats, daily_focus, task_stats};
