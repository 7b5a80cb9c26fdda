mod config;
mod db;
mod error;
mod handlers;
mod models;
#[cfg(test)]
mod test;

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::{config::Config, handlers::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    std::fs::create_dir_all(&config.database_dir)?;
    let database_url = format!("sqlite://{}/vendor-management.db", config.database_dir);
    tracing::info!(%database_url, "Opening database");

    let pool = db::init_db_pool(&database_url, config.max_pool_size).await?;

    let app = handlers::api_router(AppState::new(pool));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
