//! Points, streak and level rules.
//!
//! A user's progress changes only in response to a [`TaskEventKind`]. The
//! rules are:
//!
//! - `task_created` earns a flat [`POINTS_TASK_CREATED`].
//! - `task_completed` earns [`POINTS_TASK_COMPLETED`] and updates the daily
//!   streak. Completing on the calendar day right after the last completion
//!   extends the streak and earns `new_streak * STREAK_BONUS` on top. A gap of
//!   more than one day resets the streak to 1. A second completion on the same
//!   day leaves the streak alone and earns no bonus.
//! - The level is always `total_points / POINTS_PER_LEVEL + 1`.
//!
//! [`UserProgress::apply`] is the single entry point; the database layer wraps
//! it in a locked read-modify-write transaction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// Points for creating a task.
pub const POINTS_TASK_CREATED: i32 = 2;

/// Base points for completing a task.
pub const POINTS_TASK_COMPLETED: i32 = 10;

/// Bonus per streak day when a completion extends the streak.
pub const STREAK_BONUS: i32 = 5;

/// Points needed to advance one level.
pub const POINTS_PER_LEVEL: i32 = 100;

// ---------------------------------------------------------------------------
// Event kind
// ---------------------------------------------------------------------------

/// Task lifecycle events that affect progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEventKind {
    TaskCreated,
    TaskCompleted,
}

impl TaskEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskEventKind::TaskCreated => "task_created",
            TaskEventKind::TaskCompleted => "task_completed",
        }
    }
}

impl fmt::Display for TaskEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskEventKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task_created" => Ok(TaskEventKind::TaskCreated),
            "task_completed" => Ok(TaskEventKind::TaskCompleted),
            other => Err(CoreError::UnknownEventKind(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Cumulative gamification state for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    pub total_points: i32,
    pub current_level: i32,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub last_activity_date: Option<Date>,
    pub tasks_completed: i32,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            total_points: 0,
            current_level: 1,
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
            tasks_completed: 0,
        }
    }
}

/// Outcome of applying one event, returned to the caller for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsDelta {
    pub points_earned: i32,
    pub new_level: i32,
    pub new_streak: i32,
    pub new_total_points: i32,
}

impl UserProgress {
    /// Apply a task event that happened on `today`, mutating the progress in
    /// place and returning what changed.
    pub fn apply(&mut self, kind: TaskEventKind, today: Date) -> StatsDelta {
        let mut points_earned = 0;

        match kind {
            TaskEventKind::TaskCreated => {
                points_earned += POINTS_TASK_CREATED;
            }
            TaskEventKind::TaskCompleted => {
                points_earned += POINTS_TASK_COMPLETED;

                let (streak, bonus) =
                    next_streak(self.current_streak, self.last_activity_date, today);
                points_earned += bonus;

                self.current_streak = streak;
                self.longest_streak = self.longest_streak.max(streak);
                self.tasks_completed = self.tasks_completed.saturating_add(1);
                // Never moves backwards on an out-of-order event.
                self.last_activity_date =
                    Some(self.last_activity_date.map_or(today, |last| last.max(today)));
            }
        }

        self.total_points = self.total_points.saturating_add(points_earned);
        self.current_level = level_for_points(self.total_points);

        StatsDelta {
            points_earned,
            new_level: self.current_level,
            new_streak: self.current_streak,
            new_total_points: self.total_points,
        }
    }
}

/// Compute the streak after a completion on `today`, plus any bonus points.
fn next_streak(current: i32, last: Option<Date>, today: Date) -> (i32, i32) {
    let Some(last) = last else {
        return (1, 0);
    };

    match (today - last).num_days() {
        1 => {
            let extended = current.saturating_add(1);
            (extended, extended.saturating_mul(STREAK_BONUS))
        }
        d if d > 1 => (1, 0),
        // Same day, or the clock went backwards.
        _ => (current, 0),
    }
}

/// Level reached with `total_points`.
pub fn level_for_points(total_points: i32) -> i32 {
    total_points.max(0) / POINTS_PER_LEVEL + 1
}

/// Percent of the way from the current level to the next one.
pub fn level_progress_percent(total_points: i32) -> i32 {
    total_points.max(0) % POINTS_PER_LEVEL
}
