//! Category model and DTOs.

use planit_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
}

/// DTO for creating a category. `color` falls back to the default.
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub color: Option<String>,
}
