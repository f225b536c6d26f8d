use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, Method, StatusCode},
    routing::{get, post, put},
    serve, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::errors::AppError;
use mousespa_types::domain::order::{Order, OrderId, OrderStatus, OrderSubmission, OrderTracking};
use mousespa_types::envelope::ApiResponse;
use mousespa_types::ports::order_repository::OrderRepository;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
    /// Root of the public front end; `admin.html` in it is served at `/admin`.
    pub static_dir: PathBuf,
}

#[derive(Clone)]
pub struct HttpServer<R>
where
    R: OrderRepository,
{
    pub service: Arc<OrderService<R>>,
    pub config: HttpServerConfig,
}

#[derive(Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    message: &'static str,
}

const ROUTES: [(&str, &str, &str); 6] = [
    ("POST", "/api/orders", "create order"),
    ("GET", "/api/orders", "list orders"),
    ("GET", "/api/orders/{id}", "get order by id"),
    ("DELETE", "/api/orders/{id}", "delete order"),
    ("PUT", "/api/orders/{id}/status", "update order status"),
    ("GET", "/api/orders/track/{id}", "track order (customer)"),
];

impl<R> HttpServer<R>
where
    R: OrderRepository + Send + Sync + 'static,
{
    pub async fn new(service: OrderService<R>, config: HttpServerConfig) -> anyhow::Result<Self> {
        Ok(Self {
            service: Arc::new(service),
            config,
        })
    }

    pub fn router(&self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::ORIGIN,
                header::CONTENT_TYPE,
                header::ACCEPT,
                header::AUTHORIZATION,
            ])
            .expose_headers([header::CONTENT_LENGTH]);

        let api = Router::new()
            .route(
                "/orders",
                post(create_order::<R>)
                    .get(list_orders::<R>)
                    .fallback(method_not_allowed),
            )
            .route(
                "/orders/track/{id}",
                get(track_order::<R>).fallback(method_not_allowed),
            )
            .route(
                "/orders/{id}",
                get(get_order::<R>)
                    .delete(delete_order::<R>)
                    .fallback(method_not_allowed),
            )
            .route(
                "/orders/{id}/status",
                put(update_status::<R>).fallback(method_not_allowed),
            )
            .fallback(api_not_found)
            .with_state(self.service.clone());

        let static_dir = &self.config.static_dir;
        Router::new()
            .route("/health", get(health))
            .nest("/api", api)
            .route_service("/admin", ServeFile::new(static_dir.join("admin.html")))
            .fallback_service(ServeDir::new(static_dir))
            .layer(cors)
            .layer(trace_layer)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = self.router();

        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        tracing::info!("starting server on {}", addr);
        for (method, path, what) in ROUTES {
            tracing::info!("  {method:<6} {path:<26} {what}");
        }
        tracing::info!(static_dir = %self.config.static_dir.display(), "front end at /, admin at /admin");
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn health() -> (StatusCode, Json<Health>) {
    (
        StatusCode::OK,
        Json(Health {
            status: "ok",
            message: "MouseSpa backend is running",
        }),
    )
}

async fn api_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::failure("Not found", None)),
    )
}

async fn method_not_allowed() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ApiResponse::failure("Method not allowed", None)),
    )
}

/// Accepts unsigned decimal ids that fit the store's key type.
fn parse_id(raw: &str) -> Result<OrderId, AppError> {
    raw.parse::<u64>()
        .ok()
        .and_then(|v| OrderId::try_from(v).ok())
        .ok_or_else(|| AppError::bad_request("Invalid ID", None))
}

async fn create_order<R>(
    State(service): State<Arc<OrderService<R>>>,
    payload: Result<Json<OrderSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Order>>), AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let Json(submission) = payload
        .map_err(|e| AppError::bad_request("Invalid order data", Some(e.body_text())))?;
    let order = service.create_order(submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Order created", order)),
    ))
}

async fn list_orders<R>(
    State(service): State<Arc<OrderService<R>>>,
) -> Result<Json<ApiResponse<Vec<Order>>>, AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let list = service.list_orders().await?;
    Ok(Json(ApiResponse::listed("Orders fetched", list)))
}

async fn get_order<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Order>>, AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let order = service.get_order(id).await?;
    Ok(Json(ApiResponse::ok("Order found", order)))
}

async fn delete_order<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    service.delete_order(id).await?;
    Ok(Json(ApiResponse::done("Order deleted")))
}

async fn update_status<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Order>>, AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let Json(payload) = payload
        .map_err(|e| AppError::bad_request("Invalid status data", Some(e.body_text())))?;
    let updated = service.update_status(id, payload.status).await?;
    Ok(Json(ApiResponse::ok("Order status updated", updated)))
}

async fn track_order<R>(
    State(service): State<Arc<OrderService<R>>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<OrderTracking>>, AppError>
where
    R: OrderRepository + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let tracking = service.track_order(id).await?;
    Ok(Json(ApiResponse::ok("Order found", tracking)))
}
