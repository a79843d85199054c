//! Schema command: create the tables and exit

use anyhow::{Context, Result};
use clap::Parser;

use amapola_server::{connect, EntityStore};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (postgres://... or sqlite:...)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,
}

/// Apply the schema to the configured database
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let store = connect(&args.database_url, 1)
        .await
        .context("Failed to connect to database")?;

    store
        .migrate()
        .await
        .context("Failed to apply database schema")?;

    tracing::info!(backend = store.backend(), "schema is up to date");
    Ok(())
}
