//! Achievement catalog and evaluator.
//!
//! Achievements are derived on demand from a [`UserProgress`] snapshot; none
//! of this is persisted. An achievement is earned once the metric selected by
//! its [`CriteriaType`] reaches `criteria_value`.

use serde::{Deserialize, Serialize};

use crate::gamification::UserProgress;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// The progress metric an achievement threshold is measured against.
///
/// Stored as text. Values this build does not recognise decode to
/// [`CriteriaType::Unknown`] and are never satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CriteriaType {
    TasksCompleted,
    Streak,
    Points,
    Level,
    Unknown(String),
}

impl CriteriaType {
    pub fn parse(s: &str) -> Self {
        match s {
            "tasks_completed" => CriteriaType::TasksCompleted,
            "streak" => CriteriaType::Streak,
            "points" => CriteriaType::Points,
            "level" => CriteriaType::Level,
            other => CriteriaType::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CriteriaType::TasksCompleted => "tasks_completed",
            CriteriaType::Streak => "streak",
            CriteriaType::Points => "points",
            CriteriaType::Level => "level",
            CriteriaType::Unknown(raw) => raw,
        }
    }

    /// The metric value from `progress`, or `None` for unknown criteria.
    pub fn metric(&self, progress: &UserProgress) -> Option<i32> {
        match self {
            CriteriaType::TasksCompleted => Some(progress.tasks_completed),
            CriteriaType::Streak => Some(progress.current_streak),
            CriteriaType::Points => Some(progress.total_points),
            CriteriaType::Level => Some(progress.current_level),
            CriteriaType::Unknown(_) => None,
        }
    }
}

impl From<String> for CriteriaType {
    fn from(s: String) -> Self {
        CriteriaType::parse(&s)
    }
}

impl From<CriteriaType> for String {
    fn from(c: CriteriaType) -> Self {
        c.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// Definitions and status
// ---------------------------------------------------------------------------

/// One entry of the static achievement catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDefinition {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub criteria_type: CriteriaType,
    pub criteria_value: i32,
    /// Declared for display. Not granted automatically.
    pub points_reward: i32,
}

/// An achievement paired with the user's standing against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementStatus {
    #[serde(flatten)]
    pub achievement: AchievementDefinition,
    pub earned: bool,
    pub progress_percent: i32,
}

/// Evaluate every catalog entry against `progress`.
///
/// The result is ordered by ascending `criteria_value`; entries with equal
/// thresholds keep their catalog order.
pub fn evaluate(
    progress: &UserProgress,
    catalog: &[AchievementDefinition],
) -> Vec<AchievementStatus> {
    let mut statuses: Vec<AchievementStatus> = catalog
        .iter()
        .map(|def| {
            let (earned, progress_percent) = standing(progress, def);
            AchievementStatus {
                achievement: def.clone(),
                earned,
                progress_percent,
            }
        })
        .collect();

    statuses.sort_by_key(|s| s.achievement.criteria_value);
    statuses
}

fn standing(progress: &UserProgress, def: &AchievementDefinition) -> (bool, i32) {
    let Some(metric) = def.criteria_type.metric(progress) else {
        return (false, 0);
    };
    if def.criteria_value <= 0 {
        return (false, 0);
    }
    if metric >= def.criteria_value {
        return (true, 100);
    }
    (false, progress_percent(metric, def.criteria_value))
}

/// `round(metric / threshold * 100)` clamped to `[0, 100]`, rounding halves up.
///
/// `threshold` must be positive.
pub fn progress_percent(metric: i32, threshold: i32) -> i32 {
    let metric = i64::from(metric.max(0));
    let threshold = i64::from(threshold);
    let pct = (metric * 200 + threshold) / (threshold * 2);
    pct.clamp(0, 100) as i32
}

/// Number of earned achievements in an evaluation result.
pub fn earned_count(statuses: &[AchievementStatus]) -> usize {
    statuses.iter().filter(|s| s.earned).count()
}

// ---------------------------------------------------------------------------
// Seed catalog
// ---------------------------------------------------------------------------

/// The ten achievements shipped with the initial migration.
///
/// Ids follow insertion order. Used when the `achievements` table is empty
/// and by tests.
pub fn seed_catalog() -> Vec<AchievementDefinition> {
    const SEED: &[(&str, &str, &str, &str, &str, i32, i32)] = &[
        ("First Steps", "Complete your first task", "bi-star", "#ff6b6b", "tasks_completed", 1, 10),
        ("Task Master", "Complete 10 tasks", "bi-award", "#4ecdc4", "tasks_completed", 10, 50),
        ("Productivity Pro", "Complete 50 tasks", "bi-trophy", "#45b7d1", "tasks_completed", 50, 200),
        ("Week Warrior", "7-day streak", "bi-lightning", "#f9c80e", "streak", 7, 100),
        ("Month Master", "30-day streak", "bi-fire", "#ff6b6b", "streak", 30, 500),
        ("Early Bird", "Complete a task before 9 AM", "bi-sun", "#f9c80e", "tasks_completed", 1, 25),
        ("Night Owl", "Complete a task after 9 PM", "bi-moon", "#4a4e69", "tasks_completed", 1, 25),
        ("Speed Demon", "Complete a task within 1 hour of creation", "bi-lightning-charge", "#9b5de5", "tasks_completed", 1, 30),
        ("Overachiever", "Reach level 5", "bi-rocket", "#00bbf9", "level", 5, 100),
        ("Legend", "Reach level 10", "bi-crown", "#ff6b6b", "level", 10, 300),
    ];

    SEED.iter()
        .zip(1..)
        .map(
            |(&(name, description, icon, color, criteria, value, reward), id)| {
                AchievementDefinition {
                    id,
                    name: name.to_string(),
                    description: description.to_string(),
                    icon: icon.to_string(),
                    color: color.to_string(),
                    criteria_type: CriteriaType::parse(criteria),
                    criteria_value: value,
                    points_reward: reward,
                }
            },
        )
        .collect()
}
