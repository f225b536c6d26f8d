use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use mousespa_types::domain::order::{NewOrder, Order, OrderId, OrderStatus, OrderTracking};
use mousespa_types::ports::order_repository::{OrderRepository, RepoError};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;

use crate::codec::{decode_services, encode_services};
use crate::target::ConnectionParams;

const ORDER_COLUMNS: &str = "id, status, full_name, phone_number, email, services, item_count, \
     pickup_method, pickup_address, additional_notes, created_at, updated_at";

pub struct MySqlRepo {
    pool: MySqlPool,
}

#[derive(FromRow)]
struct DbOrder {
    id: i64,
    status: String,
    full_name: String,
    phone_number: String,
    email: String,
    services: String,
    item_count: i32,
    pickup_method: String,
    pickup_address: Option<String>,
    additional_notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DbOrder {
    fn into_order(self) -> Result<Order, RepoError> {
        Ok(Order {
            id: self.id,
            status: OrderStatus::from(self.status),
            full_name: self.full_name,
            phone_number: self.phone_number,
            email: self.email,
            services: decode_services(&self.services)?,
            item_count: self.item_count,
            pickup_method: self.pickup_method,
            pickup_address: self.pickup_address,
            additional_notes: self.additional_notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
struct DbTracking {
    id: i64,
    status: String,
    full_name: String,
    services: String,
    item_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DbTracking {
    fn into_tracking(self) -> Result<OrderTracking, RepoError> {
        Ok(OrderTracking {
            id: self.id,
            status: OrderStatus::from(self.status),
            full_name: self.full_name,
            services: decode_services(&self.services)?,
            item_count: self.item_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl MySqlRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let options = MySqlConnectOptions::from_str(database_url)?;
        Self::connect_with(options).await
    }

    pub async fn from_params(params: &ConnectionParams) -> anyhow::Result<Self> {
        tracing::info!(host = %params.host, port = params.port, "connecting to mysql");
        let options = MySqlConnectOptions::new()
            .host(&params.host)
            .port(params.port)
            .username(&params.user)
            .password(&params.password)
            .database(&params.database)
            .charset("utf8mb4");
        Self::connect_with(options).await
    }

    async fn connect_with(options: MySqlConnectOptions) -> anyhow::Result<Self> {
        let pool = MySqlPoolOptions::new().connect_with(options).await?;

        let ddl = include_str!("../migrations/mysql/0001_create_orders.sql");
        sqlx::query(ddl).execute(&pool).await?;
        tracing::info!("mysql schema ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl OrderRepository for MySqlRepo {
    async fn create(&self, order: NewOrder) -> Result<Order, RepoError> {
        let services = encode_services(&order.services)?;
        let res = sqlx::query(
            "INSERT INTO orders (status, full_name, phone_number, email, services, item_count,
                                 pickup_method, pickup_address, additional_notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(order.status.as_str())
        .bind(&order.full_name)
        .bind(&order.phone_number)
        .bind(&order.email)
        .bind(services)
        .bind(order.item_count)
        .bind(&order.pickup_method)
        .bind(&order.pickup_address)
        .bind(&order.additional_notes)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&self.pool)
        .await
        .map_err(RepoError::database)?;
        let id = OrderId::try_from(res.last_insert_id()).map_err(RepoError::database)?;
        Ok(order.with_id(id))
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        let rows: Vec<DbOrder> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(RepoError::database)?;

        rows.into_iter()
            .map(|r| r.into_order())
            .collect::<Result<Vec<_>, _>>()
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepoError> {
        let row: Option<DbOrder> =
            sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(RepoError::database)?;
        row.map(|r| r.into_order()).transpose()
    }

    async fn delete(&self, id: OrderId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::database)?;
        Ok(())
    }

    async fn update_status(&self, id: OrderId, status: &OrderStatus) -> Result<(), RepoError> {
        sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(Utc::now().trunc_subsecs(3))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepoError::database)?;
        Ok(())
    }

    async fn get_for_tracking(&self, id: OrderId) -> Result<Option<OrderTracking>, RepoError> {
        let row: Option<DbTracking> = sqlx::query_as(
            "SELECT id, status, full_name, services, item_count, created_at, updated_at
             FROM orders WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepoError::database)?;
        row.map(|r| r.into_tracking()).transpose()
    }

    async fn count(&self) -> Result<u64, RepoError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .map_err(RepoError::database)?;
        Ok(n.max(0) as u64)
    }
}
