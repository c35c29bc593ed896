use async_trait::async_trait;

use super::entity::Order;
use super::errors::OrderError;
use super::value_objects::OrderStatus;

// ============================================================================
// Order Repository - Storage Contract
// ============================================================================
//
// Implementations translate between `Order` and their storage representation.
// They apply no business rules. Soft-deleted rows are invisible to every
// method below.
//
// Errors:
// - `Conflict` from `create` when the id is already taken
// - `NotFound` from `update` / `delete` when no live row matches
// - `Storage` for anything the engine reports
//
// ============================================================================

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// All live orders.
    async fn find_all(&self) -> Result<Vec<Order>, OrderError>;

    /// `Ok(None)` when no live row has this id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, OrderError>;

    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError>;

    async fn create(&self, order: &Order) -> Result<(), OrderError>;

    /// Replaces the stored representation of `order.id`, except for
    /// `created_at` and the delete marker.
    async fn update(&self, order: &Order) -> Result<(), OrderError>;

    /// Sets the delete marker; the row stays in storage.
    async fn delete(&self, id: &str) -> Result<(), OrderError>;
}
