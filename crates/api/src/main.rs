use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use planit_api::config::ServerConfig;
use planit_api::router::build_app_router;
use planit_api::state::AppState;
use planit_core::achievements::{seed_catalog, AchievementDefinition};
use planit_db::repositories::AchievementRepo;
use planit_events::{EventBus, ProgressTracker};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "planit_api=debug,planit_events=debug,planit_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = planit_db::create_pool(&database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    planit_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    planit_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Achievement catalog ---
    let catalog = load_catalog(&pool).await;

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::new(config.event_bus_capacity));
    let tracker_handle = tokio::spawn(ProgressTracker::run(pool.clone(), event_bus.subscribe()));
    tracing::info!(capacity = config.event_bus_capacity, "Progress tracker started");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        catalog,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, draining task events");

    // The router (and its AppState clone) is gone, so this is the last
    // sender. Dropping it closes the channel once queued events are applied.
    drop(event_bus);
    if tokio::time::timeout(Duration::from_secs(5), tracker_handle)
        .await
        .is_err()
    {
        tracing::error!(
            "Progress tracker did not drain within 5s, queued task events were not applied"
        );
    }

    tracing::info!("Graceful shutdown complete");
}

/// Load the achievement catalog, falling back to the built-in seed set when
/// the table is empty.
async fn load_catalog(pool: &planit_db::DbPool) -> Arc<[AchievementDefinition]> {
    let mut catalog = AchievementRepo::list(pool)
        .await
        .expect("Failed to load achievement catalog");

    if catalog.is_empty() {
        tracing::warn!("Achievements table is empty, using built-in catalog");
        catalog = seed_catalog();
    }
    tracing::info!(count = catalog.len(), "Achievement catalog loaded");

    catalog.into()
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
