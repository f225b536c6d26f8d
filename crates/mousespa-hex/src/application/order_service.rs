use crate::errors::AppError;
use mousespa_types::domain::order::{Order, OrderId, OrderStatus, OrderSubmission, OrderTracking};
use mousespa_types::ports::order_repository::OrderRepository;

pub struct OrderService<R: OrderRepository> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create_order(&self, submission: OrderSubmission) -> Result<Order, AppError> {
        let draft = submission
            .into_new_order()
            .map_err(|e| AppError::bad_request("Invalid order data", Some(e.to_string())))?;
        let order = self
            .repo
            .create(draft)
            .await
            .map_err(|e| AppError::internal("Failed to save order", e))?;
        tracing::info!(order_id = order.id, full_name = %order.full_name, "order created");
        Ok(order)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        self.repo
            .list()
            .await
            .map_err(|e| AppError::internal("Failed to fetch orders", e))
    }

    pub async fn get_order(&self, id: OrderId) -> Result<Order, AppError> {
        match self
            .repo
            .get(id)
            .await
            .map_err(|e| AppError::internal("Failed to fetch order", e))?
        {
            Some(o) => Ok(o),
            None => Err(not_found()),
        }
    }

    pub async fn delete_order(&self, id: OrderId) -> Result<(), AppError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| AppError::internal("Failed to delete order", e))?;
        tracing::info!(order_id = id, "order deleted");
        Ok(())
    }

    /// Overwrites the status and returns the order as stored afterwards.
    pub async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<Order, AppError> {
        if !status.is_known() {
            tracing::warn!(order_id = id, %status, "unrecognised status label");
        }
        self.repo
            .update_status(id, &status)
            .await
            .map_err(|e| AppError::internal("Failed to update order status", e))?;
        let order = self.get_order(id).await?;
        tracing::info!(order_id = id, %status, "order status updated");
        Ok(order)
    }

    pub async fn track_order(&self, id: OrderId) -> Result<OrderTracking, AppError> {
        match self
            .repo
            .get_for_tracking(id)
            .await
            .map_err(|e| AppError::internal("Failed to fetch order", e))?
        {
            Some(t) => Ok(t),
            None => Err(not_found()),
        }
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Order not found".into())
}
