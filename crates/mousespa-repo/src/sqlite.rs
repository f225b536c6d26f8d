use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use mousespa_types::domain::order::{NewOrder, Order, OrderId, OrderStatus, OrderTracking};
use mousespa_types::ports::order_repository::{OrderRepository, RepoError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;

use crate::codec::{decode_services, decode_timestamp, encode_services, encode_timestamp};

const ORDER_COLUMNS: &str = "id, status, full_name, phone_number, email, services, item_count, \
     pickup_method, pickup_address, additional_notes, created_at, updated_at";

pub struct SqliteRepo {
    pool: SqlitePool,
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
    created_at: String,
    updated_at: String,
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
            created_at: decode_timestamp(&self.created_at)?,
            updated_at: decode_timestamp(&self.updated_at)?,
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
    created_at: String,
    updated_at: String,
}

impl DbTracking {
    fn into_tracking(self) -> Result<OrderTracking, RepoError> {
        Ok(OrderTracking {
            id: self.id,
            status: OrderStatus::from(self.status),
            full_name: self.full_name,
            services: decode_services(&self.services)?,
            item_count: self.item_count,
            created_at: decode_timestamp(&self.created_at)?,
            updated_at: decode_timestamp(&self.updated_at)?,
        })
    }
}

impl SqliteRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to an in-memory database sees its own database.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let ddl = include_str!("../migrations/sqlite/0001_create_orders.sql");
        sqlx::query(ddl).execute(&pool).await?;
        tracing::info!("sqlite schema ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl OrderRepository for SqliteRepo {
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
        .bind(encode_timestamp(order.created_at))
        .bind(encode_timestamp(order.updated_at))
        .execute(&self.pool)
        .await
        .map_err(RepoError::database)?;
        Ok(order.with_id(res.last_insert_rowid()))
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
            .bind(encode_timestamp(Utc::now().trunc_subsecs(3)))
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
