//! Apply the embedded schema migrations to a PostgreSQL database.
//!
//! The server never migrates on start-up; run this before deploying a new
//! release.

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use rollcall::outbound::persistence::apply_migrations;

/// `migrate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "migrate",
    about = "Apply pending rollcall schema migrations",
    version
)]
struct CliArgs {
    /// Database connection URL.
    #[arg(long = "database-url", value_name = "url", env = "ROLLCALL_DATABASE_URL")]
    database_url: String,
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
    let applied = apply_migrations(&args.database_url).wrap_err("failed to apply migrations")?;
    if applied.is_empty() {
        info!("schema is up to date");
    }
    for version in &applied {
        println!("{version}");
    }
    Ok(())
}
