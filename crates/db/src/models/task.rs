//! Task model and DTOs.

use planit_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `tasks` row joined with its category's display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub user_id: DbId,
    pub category_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
}

/// DTO for creating a task. `priority` falls back to the default.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<Date>,
    pub category_id: Option<DbId>,
}

/// DTO for patching a task. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<Date>,
    pub category_id: Option<DbId>,
}

/// Result of an update: the row after the change and the status it had before.
#[derive(Debug, Clone)]
pub struct UpdatedTask {
    pub previous_status: String,
    pub task: Task,
}
