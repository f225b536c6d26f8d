use async_trait::async_trait;

use crate::domain::order::{NewOrder, Order, OrderId, OrderStatus, OrderTracking};

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    /// Failure reported by the store, kept as the source for inspection.
    #[error("{0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("services encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl RepoError {
    pub fn database(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Database(err.into())
    }
}

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn create(&self, order: NewOrder) -> Result<Order, RepoError>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<Order>, RepoError>;
    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepoError>;
    /// Deleting a missing id is not an error.
    async fn delete(&self, id: OrderId) -> Result<(), RepoError>;
    /// Overwrites the status without checking the label or that the row exists.
    async fn update_status(&self, id: OrderId, status: &OrderStatus) -> Result<(), RepoError>;
    async fn get_for_tracking(&self, id: OrderId) -> Result<Option<OrderTracking>, RepoError>;
    async fn count(&self) -> Result<u64, RepoError>;
}
