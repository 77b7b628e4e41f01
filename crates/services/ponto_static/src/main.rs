// File: services/ponto_static/src/main.rs
use ponto_common::{logging, Context, PontoError};
use ponto_config::load_config;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), PontoError> {
    logging::init();

    let config = load_config()?;
    let app = ponto_static::router(&config.static_files)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(dir = %config.static_files.dir, "Serving static files at http://{}", addr);

    axum::serve(listener, app).await.context("Static server stopped")?;
    Ok(())
}
