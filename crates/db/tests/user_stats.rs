//! Integration tests for the transactional progress update.

use chrono::{Duration, NaiveDate};
use planit_core::gamification::TaskEventKind;
use planit_core::types::DbId;
use planit_db::models::user::CreateUser;
use planit_db::repositories::{UserRepo, UserStatsRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> DbId {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: "not-a-real-hash".to_string(),
    };
    UserRepo::register(pool, &input)
        .await
        .expect("user registration should succeed")
        .id
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Seed a progress row directly, bypassing the rule engine.
async fn seed_stats(
    pool: &PgPool,
    user_id: DbId,
    total_points: i32,
    streak: i32,
    last_activity: Option<NaiveDate>,
) {
    sqlx::query(
        "INSERT INTO user_stats
            (user_id, total_points, current_level, current_streak, longest_streak, last_activity_date)
         VALUES ($1, $2, $2 / 100 + 1, $3, $3, $4)",
    )
    .bind(user_id)
    .bind(total_points)
    .bind(streak)
    .bind(last_activity)
    .execute(pool)
    .await
    .expect("seeding stats should succeed");
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_event_creates_row_lazily(pool: PgPool) {
    let user_id = new_user(&pool, "lazy").await;
    assert!(UserStatsRepo::find_by_user(&pool, user_id).await.unwrap().is_none());

    let delta = UserStatsRepo::apply_event(&pool, user_id, TaskEventKind::TaskCreated, day(2024, 5, 1))
        .await
        .unwrap();

    assert_eq!(delta.points_earned, 2);
    assert_eq!(delta.new_total_points, 2);
    assert_eq!(delta.new_level, 1);

    let stats = UserStatsRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(stats.total_points, 2);
    assert_eq!(stats.tasks_completed, 0);
    assert!(stats.last_activity_date.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn first_completion_starts_streak(pool: PgPool) {
    let user_id = new_user(&pool, "starter").await;

    let delta =
        UserStatsRepo::apply_event(&pool, user_id, TaskEventKind::TaskCompleted, day(2024, 5, 1))
            .await
            .unwrap();

    assert_eq!(delta.new_streak, 1);
    assert_eq!(delta.points_earned, 10);

    let stats = UserStatsRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(stats.tasks_completed, 1);
    assert_eq!(stats.longest_streak, 1);
    assert_eq!(stats.last_activity_date, Some(day(2024, 5, 1)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn consecutive_day_completion_earns_bonus(pool: PgPool) {
    let user_id = new_user(&pool, "streaker").await;
    let today = day(2024, 5, 10);
    seed_stats(&pool, user_id, 40, 3, Some(today - Duration::days(1))).await;

    let delta = UserStatsRepo::apply_event(&pool, user_id, TaskEventKind::TaskCompleted, today)
        .await
        .unwrap();

    assert_eq!(delta.new_streak, 4);
    assert_eq!(delta.points_earned, 30);
    assert_eq!(delta.new_total_points, 70);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn long_gap_resets_streak(pool: PgPool) {
    let user_id = new_user(&pool, "lapsed").await;
    let today = day(2024, 5, 10);
    seed_stats(&pool, user_id, 0, 8, Some(today - Duration::days(5))).await;

    let delta = UserStatsRepo::apply_event(&pool, user_id, TaskEventKind::TaskCompleted, today)
        .await
        .unwrap();

    assert_eq!(delta.new_streak, 1);
    assert_eq!(delta.points_earned, 10);

    let stats = UserStatsRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(stats.longest_streak, 8);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn crossing_level_boundary(pool: PgPool) {
    let user_id = new_user(&pool, "climber").await;
    seed_stats(&pool, user_id, 95, 0, None).await;

    let delta =
        UserStatsRepo::apply_event(&pool, user_id, TaskEventKind::TaskCompleted, day(2024, 5, 10))
            .await
            .unwrap();

    assert_eq!(delta.new_total_points, 105);
    assert_eq!(delta.new_level, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_events_for_one_user_are_not_lost(pool: PgPool) {
    let user_id = new_user(&pool, "busy").await;
    let today = day(2024, 5, 10);

    let mut handles = Vec::new();
    for _ in 0..10 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            UserStatsRepo::apply_event(&pool, user_id, TaskEventKind::TaskCreated, today).await
        }));
    }

    let mut earned = 0;
    for handle in handles {
        earned += handle.await.unwrap().unwrap().points_earned;
    }

    let stats = UserStatsRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(earned, 20);
    assert_eq!(stats.total_points, 20);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn points_never_drift_from_returned_deltas(pool: PgPool) {
    let user_id = new_user(&pool, "ledger").await;
    let start = day(2024, 5, 1);
    let events = [
        (TaskEventKind::TaskCreated, 0),
        (TaskEventKind::TaskCompleted, 0),
        (TaskEventKind::TaskCompleted, 1),
        (TaskEventKind::TaskCompleted, 2),
        (TaskEventKind::TaskCompleted, 2),
        (TaskEventKind::TaskCreated, 9),
        (TaskEventKind::TaskCompleted, 10),
    ];

    let mut earned = 0;
    for (kind, offset) in events {
        let delta = UserStatsRepo::apply_event(&pool, user_id, kind, start + Duration::days(offset))
            .await
            .unwrap();
        earned += delta.points_earned;

        let stats = UserStatsRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
        assert_eq!(stats.total_points, earned);
        assert_eq!(stats.current_level, stats.total_points / 100 + 1);
        assert!(stats.longest_streak >= stats.current_streak);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn progress_for_unknown_user_is_zero_state(pool: PgPool) {
    let progress = UserStatsRepo::progress_for_user(&pool, 987_654).await.unwrap();
    assert_eq!(progress.total_points, 0);
    assert_eq!(progress.current_level, 1);
    assert_eq!(progress.current_streak, 0);
}
