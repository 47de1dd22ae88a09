//! Out-of-band account administration: seed the administrator and delete
//! users together with their reports.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use feedeyes::config::{AdminSeedSettings, DatabaseSettings};
use feedeyes::domain::{EmailAddress, UserDirectoryService, Username};
use feedeyes::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};

/// `feedeyes-admin` command arguments.
#[derive(Debug, Parser)]
#[command(name = "feedeyes-admin", about = "Feedeyes account administration", version)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or refresh the administrator from `ADMIN_USERNAME`,
    /// `ADMIN_EMAIL` and `ADMIN_PASS`.
    SeedAdmin,
    /// Delete an account and every report it owns.
    DeleteUser {
        /// Username of the account to remove.
        username: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(args.command))
}

async fn run(command: Command) -> Result<()> {
    let database_url = DatabaseSettings::from_env()
        .and_then(|settings| settings.database_url())
        .wrap_err("resolve database settings")?;
    run_pending_migrations(&database_url)
        .await
        .wrap_err("apply migrations")?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_min_idle(None))
        .await
        .wrap_err("create database pool")?;
    let directory = UserDirectoryService::new(Arc::new(DieselUserRepository::new(pool)));

    match command {
        Command::SeedAdmin => {
            let settings = AdminSeedSettings::from_env().wrap_err("load admin settings")?;
            let password = settings.password().wrap_err("admin password")?;
            let username = Username::new(settings.username()).wrap_err("admin username")?;
            let email = EmailAddress::new(settings.email()).wrap_err("admin email")?;
            let admin = directory
                .seed_admin(username, email, password)
                .await
                .wrap_err("seed admin")?;
            info!(user_id = %admin.id(), username = %admin.username(), "admin account ready");
        }
        Command::DeleteUser { username } => {
            let username = Username::new(&username).wrap_err("username")?;
            directory
                .delete_user(&username)
                .await
                .with_context(|| format!("delete user {username}"))?;
            info!(%username, "user and reports deleted");
        }
    }
    Ok(())
}
