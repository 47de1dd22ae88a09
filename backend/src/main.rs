//! Feedeyes entry-point: applies migrations, builds the pool and serves the
//! pages.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use feedeyes::config::{DatabaseSettings, ServerSettings};
use feedeyes::inbound::http::health::HealthState;
use feedeyes::inbound::http::session_config::{BuildMode, session_settings_from_env};
use feedeyes::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

use server::{PoolHealth, ServerConfig, create_server};

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

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let database = DatabaseSettings::from_env().map_err(std::io::Error::other)?;
    let bind_addr = ServerSettings::from_env()
        .and_then(|settings| settings.bind_addr())
        .map_err(std::io::Error::other)?;
    let database_url = database.database_url().map_err(std::io::Error::other)?;

    let applied = run_pending_migrations(&database_url)
        .await
        .map_err(std::io::Error::other)?;
    info!(applied, "database migrations up to date");

    let mut pool_config = PoolConfig::new(database_url);
    if let Some(max_size) = database.pool_max_size {
        pool_config = pool_config.with_max_size(max_size);
    }
    let pool = DbPool::new(pool_config)
        .await
        .map_err(std::io::Error::other)?;

    let health_state =
        web::Data::new(HealthState::new().with_dependency(Arc::new(PoolHealth(pool.clone()))));
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(session, bind_addr, pool),
    )?;
    info!(%bind_addr, "feedeyes listening");
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
