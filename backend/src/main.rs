//! Trackwell Backend
//!
//! Daily views over self-logged nutrition and wellness data.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Window resolution and response assembly
//! - Store: Raw event streams per user and date range
//! - Shared engine: Pure bucketing, scoring, and correlation

use anyhow::Result;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trackwell_backend::{config, routes, state::AppState, store};
use trackwell_shared::TzOffset;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Trackwell Backend"
    );

    validate_config(&config)?;

    // Build the event store, seeded when a fixture is configured
    let store = store::build_store(config.store.seed_path.as_deref()).await?;
    if config.store.seed_path.is_none() {
        info!("No seed file configured, starting with an empty event store");
    }

    // Create application state
    let state = AppState::new(store, config.clone());

    // Build application
    let app = routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "trackwell_backend=info,tower_http=info".into()
        } else {
            "trackwell_backend=debug,tower_http=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate engine configuration before serving any traffic
fn validate_config(config: &config::AppConfig) -> Result<()> {
    if TzOffset::from_minutes(config.engine.timezone_offset_minutes).is_none() {
        anyhow::bail!(
            "timezone_offset_minutes {} is outside UTC-14..UTC+14",
            config.engine.timezone_offset_minutes
        );
    }

    if config.engine.default_calorie_goal_kcal <= 0.0 {
        anyhow::bail!(
            "default_calorie_goal_kcal {} must be positive",
            config.engine.default_calorie_goal_kcal
        );
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
