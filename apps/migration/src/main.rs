//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` and applies or rolls back the schema, e.g. `migration up`.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sea_orm_migration=info".into()),
        )
        .init();

    tracing::info!("Running Quire schema migrations");

    cli::run_cli(migration::Migrator).await;
}
