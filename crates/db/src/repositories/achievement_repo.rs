//! Repository for the read-only `achievements` catalog.

use planit_core::achievements::AchievementDefinition;
use sqlx::PgPool;

use crate::models::achievement::Achievement;

const COLUMNS: &str =
    "id, name, description, icon, color, criteria_type, criteria_value, points_reward";

/// Loads the achievement catalog.
pub struct AchievementRepo;

impl AchievementRepo {
    /// Load every definition ordered by threshold, then id.
    pub async fn list(pool: &PgPool) -> Result<Vec<AchievementDefinition>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM achievements ORDER BY criteria_value, id");
        let rows = sqlx::query_as::<_, Achievement>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(AchievementDefinition::from).collect())
    }
}
