//! Achievement catalog row.

use planit_core::achievements::{AchievementDefinition, CriteriaType};
use planit_core::types::DbId;
use sqlx::FromRow;

/// A row from the `achievements` table.
#[derive(Debug, Clone, FromRow)]
pub struct Achievement {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub criteria_type: String,
    pub criteria_value: i32,
    pub points_reward: i32,
}

impl From<Achievement> for AchievementDefinition {
    fn from(row: Achievement) -> Self {
        AchievementDefinition {
            id: row.id,
            name: row.name,
            description: row.description,
            icon: row.icon,
            color: row.color,
            criteria_type: CriteriaType::from(row.criteria_type),
            criteria_value: row.criteria_value,
            points_reward: row.points_reward,
        }
    }
}
