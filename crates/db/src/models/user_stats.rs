//! Per-user gamification progress row.

use planit_core::gamification::UserProgress;
use planit_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_stats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserStats {
    pub id: DbId,
    pub user_id: DbId,
    pub total_points: i32,
    pub current_level: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<Date>,
    pub tasks_completed: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserStats {
    pub fn progress(&self) -> UserProgress {
        UserProgress {
            total_points: self.total_points,
            current_level: self.current_level,
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            last_activity_date: self.last_activity_date,
            tasks_completed: self.tasks_completed,
        }
    }
}
