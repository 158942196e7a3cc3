//! Background consumer that turns task events into progress updates.
//!
//! [`ProgressTracker`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and applies each [`TaskEvent`] through
//! [`UserStatsRepo::apply_event`]. Updates are best-effort: a failure is
//! logged and the loop moves on, so the task mutation that produced the event
//! is never affected. The loop exits when the bus is dropped.

use planit_core::gamification::StatsDelta;
use planit_db::repositories::UserStatsRepo;
use planit_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::TaskEvent;

/// Background service that applies task events to user progress.
pub struct ProgressTracker;

impl ProgressTracker {
    /// Run the consume loop until the channel closes.
    ///
    /// Events are handled one at a time in publish order.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<TaskEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => match Self::handle(&pool, &event).await {
                    Ok(delta) => {
                        tracing::info!(
                            user_id = event.user_id,
                            task_id = event.task_id,
                            event = %event.kind,
                            points_earned = delta.points_earned,
                            total_points = delta.new_total_points,
                            level = delta.new_level,
                            streak = delta.new_streak,
                            "User progress updated",
                        );
                    }
                    Err(e) => {
                        tracing::error!(
                            error = %e,
                            user_id = event.user_id,
                            task_id = event.task_id,
                            event = %event.kind,
                            "Failed to update user progress"
                        );
                    }
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::error!(
                        skipped = n,
                        "Progress tracker lagged, {n} task events were dropped and their progress is lost"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, progress tracker shutting down");
                    break;
                }
            }
        }
    }

    /// Apply a single event, using the UTC calendar date it occurred on.
    pub async fn handle(pool: &DbPool, event: &TaskEvent) -> Result<StatsDelta, sqlx::Error> {
        let today = event.occurred_at.date_naive();
        UserStatsRepo::apply_event(pool, event.user_id, event.kind, today).await
    }
}
