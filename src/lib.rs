pub mod api;
pub mod config;
pub mod core_state;
pub mod draft;
pub mod home;
pub mod models;
pub mod reports;
pub mod schedule;
pub mod stats;
pub mod tracker;
pub mod trend;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Start the tracker: logging, shared state, and the local API server.
/// Runs until Ctrl-C.
pub async fn run() -> Result<(), String> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let tracker_config = config::TrackerConfig::from_env();
    tracing::info!(
        duplicate_policy = %tracker_config.duplicate_policy,
        adherence_window = %tracker_config.adherence_window,
        roster_weighting = %tracker_config.roster_weighting,
        "Tracker policies"
    );

    let core = Arc::new(core_state::CoreState::new(tracker_config));
    let mut server = api::start_api_server_on(core, config::bind_addr()).await?;
    tracing::info!(addr = %server.session.server_addr, "Serving tracker API");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for shutdown signal: {e}"))?;

    server.shutdown();
    server.stopped().await;
    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}
