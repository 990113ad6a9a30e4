//! Create the administrative account if it does not exist yet.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use roteiro_backend::domain::{SuperuserOutcome, SuperuserProvisioner};
use roteiro_backend::outbound::auth::Argon2PasswordHasher;
use roteiro_backend::outbound::persistence::{
    DbPool, DieselUserRepository, PoolSizing, run_pending_migrations,
};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

/// `create-superuser` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "create-superuser",
    about = "Create the staff account used to administer tourist spots",
    version
)]
struct CliArgs {
    #[arg(long, env = "ROTEIRO_SUPERUSER_EMAIL", default_value = "admin@example.com")]
    email: String,
    #[arg(long, env = "ROTEIRO_SUPERUSER_NAME", default_value = "admin")]
    name: String,
    #[arg(
        long,
        env = "ROTEIRO_SUPERUSER_PASSWORD",
        default_value = "admin123",
        hide_env_values = true
    )]
    password: String,
    /// PostgreSQL URL.
    #[arg(long, env = "ROTEIRO_DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt().with_env_filter(EnvFilter::from_default_env()).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let password = Zeroizing::new(args.password);
    let database_url = args
        .database_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| eyre!("ROTEIRO_DATABASE_URL must be set to create the superuser"))?;

    run_pending_migrations(&database_url)
        .await
        .wrap_err("apply migrations")?;
    let pool = DbPool::connect(&database_url, PoolSizing::single())
        .await
        .wrap_err("create database pool")?;

    let provisioner = SuperuserProvisioner::new(
        Arc::new(DieselUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher),
    );
    let outcome = provisioner
        .ensure(&args.name, &args.email, &password)
        .await
        .map_err(|err| eyre!("provision superuser: {err}"))?;

    match outcome {
        SuperuserOutcome::Created(user) => {
            println!("Superuser {} created.", user.email);
        }
        SuperuserOutcome::AlreadyExists(email) => {
            println!("Superuser {email} already exists.");
        }
    }
    Ok(())
}
