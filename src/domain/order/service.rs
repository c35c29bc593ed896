use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, SubsecRound, Utc};

use super::entity::{NewOrder, Order, OrderUpdate};
use super::errors::{OrderError, StorageError};
use super::repository::OrderRepository;
use super::value_objects::OrderStatus;

// ============================================================================
// Order Service
// ============================================================================
//
// Orchestrates: Request → Validation / Merge → Repository
//
// All business rules live here. The repository is injected at construction
// and is only ever reached through `bounded`, which applies the optional
// storage deadline.
//
// ============================================================================

#[derive(Clone)]
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
    deadline: Option<Duration>,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self {
            repository,
            deadline: None,
        }
    }

    /// Bound every storage call by `deadline`. An expired call is dropped
    /// and reported as `StorageError::TimedOut`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub async fn get_all_orders(&self) -> Result<Vec<Order>, OrderError> {
        let orders = self.bounded(self.repository.find_all()).await?;
        tracing::debug!(count = orders.len(), "Fetched all orders");
        Ok(orders)
    }

    pub async fn get_order_by_id(&self, id: &str) -> Result<Order, OrderError> {
        self.bounded(self.repository.find_by_id(id))
            .await?
            .ok_or_else(OrderError::not_found)
    }

    /// Arbitrary input is accepted; a label outside the vocabulary matches
    /// nothing.
    pub async fn get_orders_by_status(&self, status: &str) -> Result<Vec<Order>, OrderError> {
        let status = match status.parse::<OrderStatus>() {
            Ok(status) => status,
            Err(err) => {
                tracing::debug!(error = %err, "Status filter matches no orders");
                return Ok(Vec::new());
            }
        };

        let orders = self.bounded(self.repository.find_by_status(status)).await?;
        tracing::debug!(status = %status, count = orders.len(), "Fetched orders by status");
        Ok(orders)
    }

    pub async fn create_order(&self, new: NewOrder) -> Result<Order, OrderError> {
        let now = now();

        if new.id.is_empty() || new.order_id.is_empty() || new.customer_id.is_empty() {
            tracing::warn!(
                order_id = %new.id,
                "Rejected order creation with missing required fields"
            );
            return Err(OrderError::Validation(
                "id, orderId and customerId are required".to_string(),
            ));
        }

        let order = Order {
            id: new.id,
            order_id: new.order_id,
            customer_id: new.customer_id,
            status: new.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.bounded(self.repository.create(&order)).await?;

        tracing::info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            status = %order.status,
            "Order created"
        );

        Ok(order)
    }

    /// Partial update. Returns the merged record as written.
    ///
    /// Concurrent updates to the same id are last-writer-wins.
    pub async fn update_order(&self, update: OrderUpdate) -> Result<Order, OrderError> {
        let mut order = self
            .bounded(self.repository.find_by_id(&update.id))
            .await?
            .ok_or_else(OrderError::not_found)?;

        update.merge_into(&mut order);
        order.updated_at = now().max(order.created_at);

        self.bounded(self.repository.update(&order)).await?;

        tracing::info!(
            order_id = %order.id,
            status = %order.status,
            "Order updated"
        );

        Ok(order)
    }

    pub async fn delete_order(&self, id: &str) -> Result<(), OrderError> {
        if self.bounded(self.repository.find_by_id(id)).await?.is_none() {
            return Err(OrderError::not_found());
        }

        self.bounded(self.repository.delete(id)).await?;

        tracing::info!(order_id = %id, "Order deleted");
        Ok(())
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, OrderError>
    where
        F: Future<Output = Result<T, OrderError>>,
    {
        let result = match self.deadline {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| StorageError::TimedOut)?,
            None => call.await,
        };

        if let Err(OrderError::Storage(err)) = &result {
            tracing::error!(error = %err, "Storage call failed");
        }

        result
    }
}

// Storage keeps microseconds.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

// ============================================================================
// Unit Tests
// ============================================================================
