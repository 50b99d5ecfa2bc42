//! Backend entry-point: loads settings, opens the pool and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use rollcall::config::AppSettings;
use rollcall::inbound::http::health::HealthState;
use rollcall::outbound::persistence::{DbPool, PoolConfig};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let database_url = settings.database_url().ok_or_else(|| {
        std::io::Error::other("ROLLCALL_DATABASE_URL must be set to start the server")
    })?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;
    if settings.api_key().is_none() {
        warn!("ROLLCALL_API_KEY is not set; every /api/v1 request will be rejected");
    }

    let pool_config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size());
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|e| std::io::Error::other(format!("failed to open database pool: {e}")))?;

    let config = ServerConfig::new(bind_addr)
        .with_api_key(settings.api_key().map(str::to_owned))
        .with_db_pool(pool);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}
