pub mod auth;
pub mod categories;
pub mod gamification;
pub mod health;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                      register (public)
/// /auth/login                         login (public)
/// /auth/logout                        logout (requires auth)
///
/// /tasks                              list, create
/// /tasks/{id}                         get, update, delete
///
/// /categories                         list, create
///
/// /gamification/stats                 progress summary
/// /gamification/achievements          achievement status
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/tasks", tasks::router())
        .nest("/categories", categories::router())
        .nest("/gamification", gamification::router())
}
