//! Fills an empty orders table with sample data.

use anyhow::Context;
use mousespa_hex::application::seed::{seed_orders, SeedOutcome};
use mousespa_hex::config::Config;
use mousespa_repo::build_repo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;
    let repo = build_repo(&config.database)
        .await
        .with_context(|| format!("connecting to {}", config.database))?;

    match seed_orders(&repo).await? {
        SeedOutcome::Skipped { existing } => {
            tracing::info!("database already holds {existing} orders, nothing to do")
        }
        SeedOutcome::Seeded { inserted, failed, total } => {
            tracing::info!("seed done: {inserted} inserted, {failed} failed, {total} orders total")
        }
    }
    Ok(())
}
