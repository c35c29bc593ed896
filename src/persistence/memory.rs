use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::order::{Order, OrderError, OrderRepository, OrderStatus};

/// In-memory order store.
///
/// Keeps the same contract as the PostgreSQL adapter, including the
/// primary-key conflict on ids that were soft-deleted earlier.
#[derive(Default)]
pub struct InMemoryOrderRepository {
    rows: RwLock<HashMap<String, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored row for `id`, deleted or not.
    pub async fn raw_row(&self, id: &str) -> Option<Order> {
        self.rows.read().await.get(id).cloned()
    }

    /// Number of stored rows, deleted ones included.
    pub async fn raw_len(&self) -> usize {
        self.rows.read().await.len()
    }

    async fn live<F>(&self, keep: F) -> Vec<Order>
    where
        F: Fn(&Order) -> bool,
    {
        let rows = self.rows.read().await;
        let mut orders: Vec<Order> = rows
            .values()
            .filter(|order| !order.is_deleted() && keep(*order))
            .cloned()
            .collect();
        orders.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        orders
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.live(|_| true).await)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, OrderError> {
        let rows = self.rows.read().await;
        Ok(rows.get(id).filter(|order| !order.is_deleted()).cloned())
    }

    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        Ok(self.live(|order| order.status == status).await)
    }

    async fn create(&self, order: &Order) -> Result<(), OrderError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&order.id) {
            return Err(OrderError::Conflict(format!("order {} already exists", order.id)));
        }
        rows.insert(order.id.clone(), order.clone());
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), OrderError> {
        let mut rows = self.rows.write().await;
        let stored = rows
            .get_mut(&order.id)
            .filter(|stored| !stored.is_deleted())
            .ok_or_else(OrderError::not_found)?;

        stored.order_id = order.order_id.clone();
        stored.customer_id = order.customer_id.clone();
        stored.status = order.status;
        stored.updated_at = order.updated_at;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), OrderError> {
        let mut rows = self.rows.write().await;
        let stored = rows
            .get_mut(id)
            .filter(|stored| !stored.is_deleted())
            .ok_or_else(OrderError::not_found)?;

        stored.deleted_at = Some(Utc::now());
        Ok(())
    }
}
