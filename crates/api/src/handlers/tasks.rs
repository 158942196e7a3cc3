//! Handlers for the `/tasks` resource.
//!
//! Creating a task and completing one publish a [`TaskEvent`] on the event
//! bus. Progress is updated by the background tracker, so the response never
//! waits on (or fails because of) gamification bookkeeping.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use planit_core::error::CoreError;
use planit_core::tasks::{classify_status_change, validate_priority, validate_status, validate_title};
use planit_core::types::DbId;
use planit_db::models::task::{CreateTask, Task, UpdateTask};
use planit_db::repositories::{CategoryRepo, TaskRepo};
use planit_events::TaskEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    let tasks = TaskRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/v1/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Task>>> {
    let task = TaskRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(DataResponse { data: task }))
}

/// POST /api/v1/tasks
///
/// Publishes `task_created` after the insert succeeds.
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<DataResponse<Task>>)> {
    validate_title(&input.title)?;
    if let Some(priority) = &input.priority {
        validate_priority(priority)?;
    }
    ensure_category_owned(&state, auth.user_id, input.category_id).await?;

    let task = TaskRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = auth.user_id, task_id = task.id, "Task created");
    state
        .event_bus
        .publish(TaskEvent::created(auth.user_id, task.id));

    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// PUT /api/v1/tasks/{id}
///
/// Partial update. Publishes `task_completed` only when the status moves
/// into `completed` from anything else.
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<DataResponse<Task>>> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    if let Some(status) = &input.status {
        validate_status(status)?;
    }
    if let Some(priority) = &input.priority {
        validate_priority(priority)?;
    }
    ensure_category_owned(&state, auth.user_id, input.category_id).await?;

    let updated = TaskRepo::update_for_user(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    tracing::info!(
        user_id = auth.user_id,
        task_id = id,
        from = %updated.previous_status,
        to = %updated.task.status,
        "Task updated"
    );

    if let Some(kind) = classify_status_change(&updated.previous_status, &updated.task.status) {
        state
            .event_bus
            .publish(TaskEvent::new(kind, auth.user_id, id));
    }

    Ok(Json(DataResponse { data: updated.task }))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TaskRepo::delete_for_user(&state.pool, id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Task", id }));
    }
    tracing::info!(user_id = auth.user_id, task_id = id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// A task may only reference one of its owner's categories.
async fn ensure_category_owned(
    state: &AppState,
    user_id: DbId,
    category_id: Option<DbId>,
) -> AppResult<()> {
    let Some(category_id) = category_id else {
        return Ok(());
    };
    if CategoryRepo::find_for_user(&state.pool, category_id, user_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Category {category_id} does not exist"
        ))));
    }
    Ok(())
}
