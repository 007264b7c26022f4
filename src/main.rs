use club_points::{AppState, ServerConfig, load_data, mock_data, persist_data, router};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = ServerConfig::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut data = load_data(&config.data_path).await;
    if config.seed_mock_data && data.activities.is_empty() && data.prizes.is_empty() {
        info!("seeding mock season data into {}", config.data_path.display());
        data = mock_data();
        persist_data(&config.data_path, &data).await?;
    }

    let app = router(AppState::new(config.data_path, data));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
