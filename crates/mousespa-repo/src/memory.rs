use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use dashmap::DashMap;
use mousespa_types::domain::order::{NewOrder, Order, OrderId, OrderStatus, OrderTracking};
use mousespa_types::ports::order_repository::{OrderRepository, RepoError};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Process-local store, handy for tests and demos. Ids are never reused.
#[derive(Clone)]
pub struct InMemoryRepo {
    pub map: Arc<DashMap<OrderId, Order>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepo {
    async fn create(&self, order: NewOrder) -> Result<Order, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let order = order.with_id(id);
        self.map.insert(id, order.clone());
        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        let mut orders: Vec<Order> = self.map.iter().map(|kv| kv.value().clone()).collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>, RepoError> {
        Ok(self.map.get(&id).map(|r| r.clone()))
    }

    async fn delete(&self, id: OrderId) -> Result<(), RepoError> {
        self.map.remove(&id);
        Ok(())
    }

    async fn update_status(&self, id: OrderId, status: &OrderStatus) -> Result<(), RepoError> {
        if let Some(mut v) = self.map.get_mut(&id) {
            v.status = status.clone();
            v.updated_at = Utc::now().trunc_subsecs(3);
        }
        Ok(())
    }

    async fn get_for_tracking(&self, id: OrderId) -> Result<Option<OrderTracking>, RepoError> {
        Ok(self.map.get(&id).map(|r| r.tracking()))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.map.len() as u64)
    }
}
