use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use ngo_calendar::shell::config::Config;
use ngo_calendar::shell::state::AppState;
use ngo_calendar::shell::{build_backend, http};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;
    let backend = build_backend(&config.backend)
        .await
        .context("opening the persistence backend")?;
    let app = http::router(AppState::new(backend));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    tracing::info!("events endpoint: http://{}/events", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("events service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "listening for ctrl-c failed");
        std::future::pending::<()>().await;
    }
}
