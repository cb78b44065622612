use climate_api::{
    api,
    config::{Config, DEFAULT_LISTEN},
    state::AppState,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config_path =
        std::env::var("CLIMATE_API_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let cfg = Config::from_file(&config_path)?;

    // Fails before binding when the database is missing or malformed.
    let state = Arc::new(AppState::from_config(&cfg)?);

    let app = api::router(state);

    let listen = cfg.listen.unwrap_or_else(|| DEFAULT_LISTEN.into());
    let addr: SocketAddr = listen.parse()?;
    info!(%addr, database = %cfg.database.path, "Starting climate-api");

    let server = axum::Server::bind(&addr).serve(app.into_make_service());

    let graceful = server.with_graceful_shutdown(shutdown_signal());
    graceful.await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("Shutdown signal received");
}
