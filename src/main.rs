use anyhow::Context;
use tracing_subscriber::EnvFilter;

use alumni_api::config;
use alumni_api::database::{schema, DatabaseManager};
use alumni_api::routes;
use alumni_api::state::{AppState, Stores};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("alumni_api=info,tower_http=info")),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Alumni API in {:?} mode", config.environment);
    if alumni_api::is_development!() {
        if let Ok(effective) = serde_json::to_string(config) {
            tracing::debug!("Effective configuration: {}", effective);
        }
    }
    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; logins will fail until it is configured");
    }

    let db = DatabaseManager::connect(&config.database).context("failed to set up database pool")?;
    if let Err(e) = schema::ensure_schema(&db).await {
        // Keep serving so /health can report the outage
        tracing::error!("Could not prepare database schema: {}", e);
    }

    let state = AppState::new(config.clone(), Stores::postgres(&db), Some(db.clone()));
    let app = routes::app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Alumni API listening on http://{}", bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
