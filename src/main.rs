mod api;
mod app_state;
mod config;
mod core;
mod errors;
mod routes;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app_state::build_app_state;
use crate::config::ServerConfig;
use crate::routes::app_router;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    let state = build_app_state();

    if state.kubeconfig_service.is_in_cluster() {
        info!("Running with in-cluster service account credentials");
    }

    let app = app_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server starting on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
