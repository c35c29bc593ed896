use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::order::{Order, StorageError};

// ============================================================================
// Row Model - 1:1 with the `orders` table
// ============================================================================

pub const TABLE: &str = "orders";

pub const COLUMNS: &str = "id, order_id, customer_id, status, created_at, updated_at, deleted_at";

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct OrderRow {
    pub id: String,
    pub order_id: String,
    pub customer_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            order_id: order.order_id.clone(),
            customer_id: order.customer_id.clone(),
            status: order.status.as_str().to_string(),
            created_at: order.created_at,
            updated_at: order.updated_at,
            deleted_at: order.deleted_at,
        }
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = StorageError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|e| StorageError::Corrupt(format!("order {}: {}", row.id, e)))?;

        Ok(Order {
            id: row.id,
            order_id: row.order_id,
            customer_id: row.customer_id,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}
