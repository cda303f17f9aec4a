//! Quadrant reassignment
//!
//! Translates a "drop this task into that quadrant" request into the patch to
//! persist. Planning is pure; applying the patch is the caller's job.

use super::model::{Task, TaskPatch};
use super::quadrant::{Quadrant, classify};

/// The two flags written by a quadrant move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagPatch {
    pub is_urgent: bool,
    pub is_important: bool,
}

impl From<Quadrant> for FlagPatch {
    fn from(quadrant: Quadrant) -> Self {
        Self {
            is_urgent: quadrant.is_urgent(),
            is_important: quadrant.is_important(),
        }
    }
}

impl From<FlagPatch> for TaskPatch {
    fn from(flags: FlagPatch) -> Self {
        TaskPatch {
            is_urgent: Some(flags.is_urgent),
            is_important: Some(flags.is_important),
            ..TaskPatch::default()
        }
    }
}

/// Outcome of planning a quadrant move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadrantMove {
    /// Task is already in the target quadrant; nothing must be written
    Unchanged,
    /// Both flags must be written together
    Move { from: Quadrant, patch: FlagPatch },
}

impl QuadrantMove {
    pub fn changed(&self) -> bool {
        matches!(self, QuadrantMove::Move { .. })
    }

    pub fn patch(&self) -> Option<FlagPatch> {
        match self {
            QuadrantMove::Unchanged => None,
            QuadrantMove::Move { patch, .. } => Some(*patch),
        }
    }
}

/// Decide whether moving `task` into `target` requires a write
///
/// Any status may be moved, including done tasks.
pub fn plan_quadrant_move(task: &Task, target: Quadrant) -> QuadrantMove {
    let current = classify(task);
    if current == target {
        QuadrantMove::Unchanged
    } else {
        QuadrantMove::Move {
            from: current,
            patch: FlagPatch::from(target),
        }
    }
}
