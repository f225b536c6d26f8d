use std::time::Duration;

use anyhow::Context;
use mousespa_types::domain::order::{Order, OrderId, OrderStatus, OrderSubmission, OrderTracking};
use mousespa_types::envelope::ApiResponse;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct OrdersClientBuilder {
    base: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

#[derive(Clone)]
pub struct OrdersClient {
    base: Url,
    client: reqwest::Client,
}

/// A response whose envelope reported `success: false`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl OrdersClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::builder(base_url)?.build()
    }

    pub fn builder(base_url: &str) -> anyhow::Result<OrdersClientBuilder> {
        let base = Url::parse(base_url).context("invalid base url")?;
        Ok(OrdersClientBuilder {
            base,
            headers: HeaderMap::new(),
            timeout: None,
            client: None,
        })
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base.join(path).context("failed to join url")
    }

    pub async fn create_order(&self, submission: &OrderSubmission) -> anyhow::Result<Order> {
        let res = self
            .client
            .post(self.url("api/orders")?)
            .json(submission)
            .send()
            .await?;
        data(decode(res).await?)
    }

    pub async fn get_order(&self, id: OrderId) -> anyhow::Result<Order> {
        let res = self
            .client
            .get(self.url(&format!("api/orders/{id}"))?)
            .send()
            .await?;
        data(decode(res).await?)
    }

    pub async fn list_orders(&self) -> anyhow::Result<Vec<Order>> {
        let res = self.client.get(self.url("api/orders")?).send().await?;
        data(decode(res).await?)
    }

    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> anyhow::Result<Order> {
        let res = self
            .client
            .put(self.url(&format!("api/orders/{id}/status"))?)
            .json(&UpdateStatusRequest { status })
            .send()
            .await?;
        data(decode(res).await?)
    }

    pub async fn track_order(&self, id: OrderId) -> anyhow::Result<OrderTracking> {
        let res = self
            .client
            .get(self.url(&format!("api/orders/track/{id}"))?)
            .send()
            .await?;
        data(decode(res).await?)
    }

    pub async fn delete_order(&self, id: OrderId) -> anyhow::Result<()> {
        let res = self
            .client
            .delete(self.url(&format!("api/orders/{id}"))?)
            .send()
            .await?;
        decode::<serde::de::IgnoredAny>(res).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> anyhow::Result<ApiResponse<T>> {
    let status = res.status();
    let body: ApiResponse<T> = res
        .json()
        .await
        .with_context(|| format!("unreadable response body (status {status})"))?;
    if !status.is_success() || !body.success {
        tracing::debug!(%status, message = %body.message, "api call failed");
        return Err(ApiError {
            status,
            message: body.message,
            detail: body.error,
        }
        .into());
    }
    Ok(body)
}

fn data<T>(body: ApiResponse<T>) -> anyhow::Result<T> {
    body.data.context("response carried no data")
}

impl OrdersClientBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(
        mut self,
        key: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> anyhow::Result<Self> {
        let header_name =
            HeaderName::from_bytes(key.as_ref().as_bytes()).context("invalid header name")?;
        let header_value = HeaderValue::from_str(value.as_ref()).context("invalid header value")?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn build(self) -> anyhow::Result<OrdersClient> {
        if let Some(client) = self.client {
            return Ok(OrdersClient {
                base: self.base,
                client,
            });
        }

        let mut builder = reqwest::Client::builder();
        if !self.headers.is_empty() {
            builder = builder.default_headers(self.headers);
        }
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(OrdersClient {
            base: self.base,
            client,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct UpdateStatusRequest {
    status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn sample_submission() -> OrderSubmission {
        OrderSubmission {
            full_name: "Dewi Lestari".into(),
            phone_number: "089876543210".into(),
            email: "dewi.lestari@gmail.com".into(),
            services: vec!["Express Clean".into()],
            item_count: 1,
            pickup_method: "cod".into(),
            pickup_address: Some("Jl. Diponegoro No. 789, Surabaya".into()),
            additional_notes: None,
        }
    }

    fn sample_order() -> Order {
        sample_submission().into_new_order().unwrap().with_id(11)
    }

    #[tokio::test]
    async fn create_and_get_order() {
        let server = MockServer::start();
        let order = sample_order();

        let create_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/orders")
                .json_body_obj(&sample_submission());
            then.status(201)
                .json_body_obj(&ApiResponse::ok("Order created", order.clone()));
        });

        let get_mock = server.mock(|when, then| {
            when.method(GET).path(format!("/api/orders/{}", order.id));
            then.status(200)
                .json_body_obj(&ApiResponse::ok("Order found", order.clone()));
        });

        let client = OrdersClient::new(&server.base_url()).unwrap();
        let created = client.create_order(&sample_submission()).await.unwrap();
        assert_eq!(created.id, order.id);
        assert_eq!(created.status.as_str(), "pending");

        let fetched = client.get_order(order.id).await.unwrap();
        assert_eq!(fetched.email, order.email);

        create_mock.assert();
        get_mock.assert();
    }

    #[tokio::test]
    async fn list_update_track_delete() {
        let server = MockServer::start();
        let order = sample_order();
        let mut updated = order.clone();
        updated.status = OrderStatus::from("done");

        let list_mock = server.mock(|when, then| {
            when.method(GET).path("/api/orders");
            then.status(200)
                .json_body_obj(&ApiResponse::listed("Orders fetched", vec![order.clone()]));
        });

        let update_mock = server.mock(|when, then| {
            when.method(httpmock::Method::PUT)
                .path(format!("/api/orders/{}/status", order.id))
                .json_body_obj(&UpdateStatusRequest {
                    status: OrderStatus::from("done"),
                });
            then.status(200)
                .json_body_obj(&ApiResponse::ok("Order status updated", updated.clone()));
        });

        let track_mock = server.mock(|when, then| {
            when.method(GET).path(format!("/api/orders/track/{}", order.id));
            then.status(200)
                .json_body_obj(&ApiResponse::ok("Order found", updated.tracking()));
        });

        let delete_mock = server.mock(|when, then| {
            when.method(DELETE).path(format!("/api/orders/{}", order.id));
            then.status(200)
                .json_body_obj(&ApiResponse::<()>::done("Order deleted"));
        });

        let client = OrdersClient::new(&server.base_url()).unwrap();
        let listed = client.list_orders().await.unwrap();
        assert_eq!(listed.len(), 1);

        let changed = client
            .update_status(order.id, OrderStatus::from("done"))
            .await
            .unwrap();
        assert_eq!(changed.status.as_str(), "done");

        let tracked = client.track_order(order.id).await.unwrap();
        assert_eq!(tracked.status.as_str(), "done");

        client.delete_order(order.id).await.unwrap();

        list_mock.assert();
        update_mock.assert();
        track_mock.assert();
        delete_mock.assert();
    }

    #[tokio::test]
    async fn failure_envelope_becomes_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/orders/99999");
            then.status(404)
                .json_body_obj(&ApiResponse::<()>::failure("Order not found", None));
        });

        let client = OrdersClient::new(&server.base_url()).unwrap();
        let err = client.get_order(99999).await.unwrap_err();
        let api = err.downcast_ref::<ApiError>().expect("api error");
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.message, "Order not found");
    }
}
