use std::sync::Arc;

use planit_core::achievements::AchievementDefinition;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind an `Arc` or is already a handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: planit_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bus the task handlers publish progress events on.
    pub event_bus: Arc<planit_events::EventBus>,
    /// Achievement catalog, loaded once at startup and never mutated.
    pub catalog: Arc<[AchievementDefinition]>,
}
