///  To run :
///  cargo r --example client_example
use mousespa_client::{ApiError, OrdersClient};
use mousespa_hex::application::order_service::OrderService;
use mousespa_hex::inbound::http::{HttpServer, HttpServerConfig};
use mousespa_repo::{build_repo, DatabaseTarget};
use mousespa_types::domain::order::{OrderStatus, OrderSubmission};
use reqwest::StatusCode;
use tempfile::tempdir;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port = find_free_port();
    let addr = format!("http://127.0.0.1:{port}/");

    // Use a temp file-backed SQLite DB so multiple connections see the same data.
    let tmp = tempdir()?;
    let db_url = format!("sqlite://{}", tmp.path().join("orders.db").display());

    let repo = build_repo(&DatabaseTarget::Url(db_url)).await?;
    let service = OrderService::new(repo);
    let server = HttpServer::new(
        service,
        HttpServerConfig {
            port: port.to_string(),
            static_dir: tmp.path().to_path_buf(),
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = OrdersClient::new(&addr)?;
    let created = client
        .create_order(&OrderSubmission {
            full_name: "Budi Santoso".into(),
            phone_number: "081234567890".into(),
            email: "budi@x.com".into(),
            services: vec!["Deep Clean".into(), "Anti-bacterial".into()],
            item_count: 2,
            pickup_method: "pickup".into(),
            pickup_address: Some("Jl. Sudirman 123".into()),
            additional_notes: None,
        })
        .await?;
    println!("Created order id={} services={:?}", created.id, created.services);

    for step in ["picked_up", "in_progress", "done", "delivered"] {
        let updated = client
            .update_status(created.id, OrderStatus::from(step))
            .await?;
        let tracked = client.track_order(created.id).await?;
        println!("Order {} is now {} ({})", updated.id, tracked.status, tracked.updated_at);
    }

    client.delete_order(created.id).await?;
    match client.get_order(created.id).await {
        Err(err)
            if err.downcast_ref::<ApiError>().map(|e| e.status) == Some(StatusCode::NOT_FOUND) =>
        {
            println!("Order {} deleted", created.id)
        }
        other => anyhow::bail!("expected 404 after delete, got {other:?}"),
    }

    handle.abort();
    Ok(())
}
