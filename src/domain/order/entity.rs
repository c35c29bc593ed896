use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::value_objects::OrderStatus;

// ============================================================================
// Order Entity
// ============================================================================

/// A customer purchase record.
///
/// `id` is supplied by the caller and never changes. `created_at` is set
/// once; `updated_at` moves forward on every mutation. A set `deleted_at`
/// hides the record from every lookup without erasing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub order_id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Creation payload. Missing string fields decode as empty and are
/// rejected by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewOrder {
    pub id: String,
    pub order_id: String,
    pub customer_id: String,
    #[serde(deserialize_with = "blank_as_unset")]
    pub status: Option<OrderStatus>,
}

impl NewOrder {
    pub fn new(
        id: impl Into<String>,
        order_id: impl Into<String>,
        customer_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            order_id: order_id.into(),
            customer_id: customer_id.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Partial-update payload.
///
/// Only fields that are present and non-empty overwrite the stored value;
/// an empty string is treated the same as an absent one, so a field can
/// never be cleared through an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderUpdate {
    pub id: String,
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    #[serde(deserialize_with = "blank_as_unset")]
    pub status: Option<OrderStatus>,
}

impl OrderUpdate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn customer_id(mut self, customer_id: impl Into<String>) -> Self {
        self.customer_id = Some(customer_id.into());
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Overwrites the supplied fields on `order`. Timestamps are left to
    /// the caller.
    pub fn merge_into(&self, order: &mut Order) {
        if let Some(order_id) = supplied(&self.order_id) {
            order.order_id = order_id.to_string();
        }
        if let Some(customer_id) = supplied(&self.customer_id) {
            order.customer_id = customer_id.to_string();
        }
        if let Some(status) = self.status {
            order.status = status;
        }
    }
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// `""` and `null` both mean "not supplied"; any other label must be known.
fn blank_as_unset<'de, D>(deserializer: D) -> Result<Option<OrderStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(label) => label.parse::<OrderStatus>().map(Some).map_err(serde::de::Error::custom),
    }
}
