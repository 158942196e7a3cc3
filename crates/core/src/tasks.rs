//! Task status and priority vocabulary (stored as text) plus the mapping from
//! status changes to progress events.

use crate::error::CoreError;
use crate::gamification::TaskEventKind;

/// Task is open.
pub const STATUS_PENDING: &str = "pending";

/// Task is done.
pub const STATUS_COMPLETED: &str = "completed";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_PENDING, STATUS_COMPLETED];

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";

/// All valid priority values.
pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH];

/// Priority assigned when a task is created without one.
pub const DEFAULT_PRIORITY: &str = PRIORITY_MEDIUM;

/// Maximum title length in characters (matches the column width).
pub const MAX_TITLE_LEN: usize = 255;

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Validate that a priority string is one of the accepted values.
pub fn validate_priority(priority: &str) -> Result<(), CoreError> {
    if VALID_PRIORITIES.contains(&priority) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid priority '{priority}'. Must be one of: {}",
            VALID_PRIORITIES.join(", ")
        )))
    }
}

/// Validate a task title: non-blank and at most [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// The progress event produced by a status change, if any.
///
/// Only a transition from a non-completed status into `completed` counts;
/// re-saving an already completed task produces nothing.
pub fn classify_status_change(old: &str, new: &str) -> Option<TaskEventKind> {
    (new == STATUS_COMPLETED && old != STATUS_COMPLETED).then_some(TaskEventKind::TaskCompleted)
}
