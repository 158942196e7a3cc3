//! Repository for the `user_stats` table.
//!
//! [`UserStatsRepo::apply_event`] is the only writer of progress rows.

use planit_core::gamification::{StatsDelta, TaskEventKind, UserProgress};
use planit_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::user_stats::UserStats;

const COLUMNS: &str = "id, user_id, total_points, current_level, current_streak, \
                       longest_streak, last_activity_date, tasks_completed, created_at, updated_at";

/// Reads and updates per-user gamification progress.
pub struct UserStatsRepo;

impl UserStatsRepo {
    /// Find the progress row for a user, if one has been created yet.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<UserStats>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_stats WHERE user_id = $1");
        sqlx::query_as::<_, UserStats>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// The user's progress, or the zero state if no event has been applied.
    pub async fn progress_for_user(pool: &PgPool, user_id: DbId) -> Result<UserProgress, sqlx::Error> {
        Ok(Self::find_by_user(pool, user_id)
            .await?
            .map(|stats| stats.progress())
            .unwrap_or_default())
    }

    /// Apply one task event to the user's progress as an isolated
    /// read-modify-write.
    ///
    /// The row is created on first use and then locked with `FOR UPDATE`, so
    /// concurrent events for the same user queue behind each other while other
    /// users proceed in parallel. Any error drops the transaction, which rolls
    /// it back and leaves the row at its pre-event values.
    pub async fn apply_event(
        pool: &PgPool,
        user_id: DbId,
        kind: TaskEventKind,
        today: Date,
    ) -> Result<StatsDelta, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("INSERT INTO user_stats (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM user_stats WHERE user_id = $1 FOR UPDATE");
        let stats = sqlx::query_as::<_, UserStats>(&query)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let mut progress = stats.progress();
        let delta = progress.apply(kind, today);

        sqlx::query(
            "UPDATE user_stats SET
                total_points = $2,
                current_level = $3,
                current_streak = $4,
                longest_streak = $5,
                last_activity_date = $6,
                tasks_completed = $7
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(progress.total_points)
        .bind(progress.current_level)
        .bind(progress.current_streak)
        .bind(progress.longest_streak)
        .bind(progress.last_activity_date)
        .bind(progress.tasks_completed)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            user_id,
            event = %kind,
            points_earned = delta.points_earned,
            total_points = delta.new_total_points,
            "Applied progress event",
        );

        Ok(delta)
    }
}
