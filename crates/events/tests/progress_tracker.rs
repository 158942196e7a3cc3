//! Integration tests for the progress tracker consuming the event bus.

use chrono::{TimeZone, Utc};
use planit_core::types::DbId;
use planit_db::models::user::CreateUser;
use planit_db::repositories::{UserRepo, UserStatsRepo};
use planit_events::{EventBus, ProgressTracker, TaskEvent};
use sqlx::PgPool;

async fn new_user(pool: &PgPool, username: &str) -> DbId {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: "hash".to_string(),
    };
    UserRepo::register(pool, &input).await.unwrap().id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tracker_applies_queued_events_then_stops(pool: PgPool) {
    let user_id = new_user(&pool, "tracked").await;
    let bus = EventBus::default();
    let receiver = bus.subscribe();

    let day1 = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let day2 = Utc.with_ymd_and_hms(2024, 6, 2, 21, 30, 0).unwrap();

    bus.publish(TaskEvent::created(user_id, 1).at(day1));
    bus.publish(TaskEvent::completed(user_id, 1).at(day1));
    bus.publish(TaskEvent::created(user_id, 2).at(day2));
    bus.publish(TaskEvent::completed(user_id, 2).at(day2));

    // Dropping the bus closes the channel once the queue drains.
    drop(bus);
    ProgressTracker::run(pool.clone(), receiver).await;

    let stats = UserStatsRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    // 2 + 10 + 2 + (10 + 2 * 5)
    assert_eq!(stats.total_points, 36);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 2);
    assert_eq!(stats.tasks_completed, 2);
    assert_eq!(stats.last_activity_date, Some(day2.date_naive()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_event_does_not_stop_the_tracker(pool: PgPool) {
    let user_id = new_user(&pool, "survivor").await;
    let bus = EventBus::default();
    let receiver = bus.subscribe();

    // No such user: the foreign key rejects the insert.
    bus.publish(TaskEvent::created(999_999, 1));
    bus.publish(TaskEvent::created(user_id, 2));
    drop(bus);

    ProgressTracker::run(pool.clone(), receiver).await;

    let stats = UserStatsRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(stats.total_points, 2);
    assert!(UserStatsRepo::find_by_user(&pool, 999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn handle_uses_the_event_date(pool: PgPool) {
    let user_id = new_user(&pool, "dated").await;
    let when = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();

    let delta = ProgressTracker::handle(&pool, &TaskEvent::completed(user_id, 1).at(when))
        .await
        .unwrap();
    assert_eq!(delta.new_streak, 1);

    let stats = UserStatsRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(
        stats.last_activity_date,
        Some(chrono::NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lagged_tracker_skips_overflow_and_applies_the_rest(pool: PgPool) {
    let user_id = new_user(&pool, "lagging").await;
    let bus = EventBus::new(2);
    let receiver = bus.subscribe();

    // Four events into a two-slot channel: the two oldest are overwritten.
    for task_id in 1..=4 {
        bus.publish(TaskEvent::created(user_id, task_id));
    }
    drop(bus);

    ProgressTracker::run(pool.clone(), receiver).await;

    let stats = UserStatsRepo::find_by_user(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(stats.total_points, 2 * 2);
}
