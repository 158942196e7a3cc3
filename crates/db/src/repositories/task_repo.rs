//! Repository for the `tasks` table.
//!
//! Every read joins the owning category so list views can show its name and
//! color without a second query. All operations are scoped to the owning user.

use planit_core::tasks::DEFAULT_PRIORITY;
use planit_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, UpdateTask, UpdatedTask};

/// Projection over `t` (tasks) and `c` (categories) matching [`Task`].
const COLUMNS: &str = "t.id, t.user_id, t.category_id, t.title, t.description, t.status, \
                       t.priority, t.due_date, t.created_at, t.updated_at, \
                       c.name AS category_name, c.color AS category_color";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// List a user's tasks, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks t
             LEFT JOIN categories c ON c.id = t.category_id
             WHERE t.user_id = $1
             ORDER BY t.created_at DESC, t.id DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find a task owned by `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks t
             LEFT JOIN categories c ON c.id = t.category_id
             WHERE t.id = $1 AND t.user_id = $2"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a task for `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "WITH t AS (
                 INSERT INTO tasks (user_id, title, description, priority, due_date, category_id)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 RETURNING *
             )
             SELECT {COLUMNS} FROM t
             LEFT JOIN categories c ON c.id = t.category_id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority.as_deref().unwrap_or(DEFAULT_PRIORITY))
            .bind(input.due_date)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Patch a task owned by `user_id`. Only non-`None` fields are applied.
    ///
    /// The previous status is read under a row lock in the same transaction,
    /// so two concurrent completions of one task cannot both observe the
    /// pre-completion status. Returns `None` if the task does not exist or
    /// belongs to someone else.
    pub async fn update_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<UpdatedTask>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<(String,)> =
            sqlx::query_as("SELECT status FROM tasks WHERE id = $1 AND user_id = $2 FOR UPDATE")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((previous_status,)) = previous else {
            return Ok(None);
        };

        let query = format!(
            "WITH t AS (
                 UPDATE tasks SET
                     title = COALESCE($3, title),
                     description = COALESCE($4, description),
                     status = COALESCE($5, status),
                     priority = COALESCE($6, priority),
                     due_date = COALESCE($7, due_date),
                     category_id = COALESCE($8, category_id)
                 WHERE id = $1 AND user_id = $2
                 RETURNING *
             )
             SELECT {COLUMNS} FROM t
             LEFT JOIN categories c ON c.id = t.category_id"
        );
        let task = sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(&input.priority)
            .bind(input.due_date)
            .bind(input.category_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(UpdatedTask {
            previous_status,
            task,
        }))
    }

    /// Delete a task owned by `user_id`. Returns `true` if a row was removed.
    pub async fn delete_for_user(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
