use mousespa_client::{ApiError, OrdersClient};
use mousespa_hex::application::order_service::OrderService;
use mousespa_hex::inbound::http::{HttpServer, HttpServerConfig};
use mousespa_repo::memory::InMemoryRepo;
use mousespa_types::domain::order::{OrderStatus, OrderSubmission};
use reqwest::StatusCode;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::test]
async fn client_round_trip_against_real_server() {
    let port = find_free_port();
    let server = HttpServer::new(
        OrderService::new(InMemoryRepo::new()),
        HttpServerConfig {
            port: port.to_string(),
            static_dir: "static".into(),
        },
    )
    .await
    .unwrap();
    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = OrdersClient::new(&format!("http://127.0.0.1:{port}/")).unwrap();
    let created = client
        .create_order(&OrderSubmission {
            full_name: "Ahmad Wijaya".into(),
            phone_number: "082112345678".into(),
            email: "ahmad.wijaya@outlook.com".into(),
            services: vec!["Deep Clean".into(), "Stain Removal".into()],
            item_count: 3,
            pickup_method: "pickup".into(),
            pickup_address: Some("Jl. Gatot Subroto No. 456, Bandung".into()),
            additional_notes: Some("Ada noda kopi yang membandel".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.status, OrderStatus::pending());

    let updated = client
        .update_status(created.id, OrderStatus::from("delivered"))
        .await
        .unwrap();
    assert_eq!(updated.status.as_str(), "delivered");
    assert_eq!(client.track_order(created.id).await.unwrap().item_count, 3);
    assert_eq!(client.list_orders().await.unwrap().len(), 1);

    client.delete_order(created.id).await.unwrap();
    let err = client.get_order(created.id).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<ApiError>().map(|e| e.status),
        Some(StatusCode::NOT_FOUND)
    );

    let mut invalid = OrderSubmission {
        full_name: "X".into(),
        phone_number: "1".into(),
        email: "x@example.com".into(),
        services: vec![],
        item_count: 1,
        pickup_method: "cod".into(),
        pickup_address: None,
        additional_notes: None,
    };
    let err = client.create_order(&invalid).await.unwrap_err();
    let api = err.downcast_ref::<ApiError>().expect("api error");
    assert_eq!(api.status, StatusCode::BAD_REQUEST);
    assert!(api.detail.is_some());

    invalid.services.push("Standard Clean".into());
    assert!(client.create_order(&invalid).await.is_ok());

    handle.abort();
}
