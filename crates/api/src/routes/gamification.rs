//! Route definitions for the `/gamification` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::gamification;
use crate::state::AppState;

/// Routes mounted at `/gamification`.
///
/// ```text
/// GET /stats         -> get_stats
/// GET /achievements  -> get_achievements
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(gamification::get_stats))
        .route("/achievements", get(gamification::get_achievements))
}
