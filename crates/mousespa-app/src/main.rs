use mousespa_hex::application::order_service::OrderService;
use mousespa_hex::config::Config;
use mousespa_hex::inbound::http::{HttpServer, HttpServerConfig};
use mousespa_repo::{build_repo, Repo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for PORT / MYSQL* / DB_* when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;
    // No storage, no server.
    let repo: Repo = match build_repo(&config.database).await {
        Ok(repo) => repo,
        Err(e) => {
            tracing::error!(error = %e, database = %config.database, "database connection failed");
            return Err(e);
        }
    };
    let service = OrderService::new(repo);

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
        static_dir: config.static_dir.clone(),
    };

    let http = HttpServer::new(service, server_cfg).await?;
    http.run().await
}
