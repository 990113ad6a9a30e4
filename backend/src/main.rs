//! Backend entry point: loads settings, prepares storage and serves HTTP.

mod server;

use std::ffi::OsString;
use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roteiro_backend::inbound::http::health::HealthState;
use roteiro_backend::outbound::persistence::{DbPool, PoolSizing, run_pending_migrations};
use roteiro_backend::settings::AppSettings;
use server::{ServerConfig, create_server};

const DEV_JWT_SECRET: &str = "roteiro-dev-secret-not-for-production";

fn jwt_secret(settings: &AppSettings) -> io::Result<Vec<u8>> {
    match settings.jwt_secret() {
        Some(secret) => Ok(secret.as_bytes().to_vec()),
        None if cfg!(debug_assertions) => {
            warn!("ROTEIRO_JWT_SECRET unset; using development signing secret");
            Ok(DEV_JWT_SECRET.as_bytes().to_vec())
        }
        None => Err(io::Error::other("ROTEIRO_JWT_SECRET must be set")),
    }
}

async fn connect_database(database_url: &str, sizing: PoolSizing) -> io::Result<DbPool> {
    let applied = run_pending_migrations(database_url)
        .await
        .map_err(io::Error::other)?;
    if !applied.is_empty() {
        info!(migrations = ?applied, "applied database migrations");
    }
    DbPool::connect(database_url, sizing)
        .await
        .map_err(|err| io::Error::other(format!("create database pool: {err}")))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings = AppSettings::load_from_iter(args)
        .map_err(|err| io::Error::other(format!("load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let gemini = settings.gemini_config().map_err(io::Error::other)?;
    if gemini.api_key.is_none() {
        warn!("ROTEIRO_GEMINI_API_KEY unset; itinerary generation will fail");
    }
    let secret = zeroize::Zeroizing::new(jwt_secret(&settings)?);

    let mut config = ServerConfig::new(bind_addr, &secret, gemini)
        .with_token_lifetimes(settings.token_lifetimes());
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect_database(database_url, settings.pool_sizing()).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "server listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
