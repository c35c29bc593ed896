use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use super::models::{OrderRow, COLUMNS, TABLE};
use crate::domain::order::{Order, OrderError, OrderRepository, OrderStatus, StorageError};

// ============================================================================
// PostgreSQL Order Repository
// ============================================================================
//
// Storage translation only:
// 1. Rows ⇄ `Order` through `OrderRow`
// 2. Every read goes through `live_select`, so soft-deleted rows never leak
// 3. Unique violations on insert become `Conflict`
// 4. Zero affected live rows on update/delete become `NotFound`
// 5. Everything else is `Storage(Backend)` with the sqlx error as cause
//
// ============================================================================

const LIVE: &str = "deleted_at IS NULL";

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_live(
        &self,
        filter: Option<&str>,
        bind: Option<&str>,
    ) -> Result<Vec<Order>, OrderError> {
        let sql = live_select(filter);
        let mut query = sqlx::query_as::<_, OrderRow>(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&self.pool).await.map_err(storage)?;
        rows.into_iter()
            .map(|row| Order::try_from(row).map_err(OrderError::from))
            .collect()
    }
}

fn live_select(filter: Option<&str>) -> String {
    match filter {
        Some(filter) => format!(
            "SELECT {COLUMNS} FROM {TABLE} WHERE {LIVE} AND {filter} ORDER BY created_at, id"
        ),
        None => format!("SELECT {COLUMNS} FROM {TABLE} WHERE {LIVE} ORDER BY created_at, id"),
    }
}

fn storage(err: sqlx::Error) -> OrderError {
    OrderError::Storage(StorageError::backend(err))
}

fn map_insert_error(err: sqlx::Error, id: &str) -> OrderError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return OrderError::Conflict(format!("order {id} already exists"));
        }
    }
    storage(err)
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        self.fetch_live(None, None).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, OrderError> {
        let mut orders = self.fetch_live(Some("id = $1"), Some(id)).await?;
        Ok(orders.pop())
    }

    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        self.fetch_live(Some("status = $1"), Some(status.as_str())).await
    }

    async fn create(&self, order: &Order) -> Result<(), OrderError> {
        let row = OrderRow::from(order);
        let sql = format!(
            "INSERT INTO {TABLE} ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7)"
        );

        sqlx::query(&sql)
            .bind(&row.id)
            .bind(&row.order_id)
            .bind(&row.customer_id)
            .bind(&row.status)
            .bind(row.created_at)
            .bind(row.updated_at)
            .bind(row.deleted_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(e, &row.id))?;

        tracing::debug!(order_id = %row.id, "Inserted order row");
        Ok(())
    }

    async fn update(&self, order: &Order) -> Result<(), OrderError> {
        let row = OrderRow::from(order);
        let sql = format!(
            "UPDATE {TABLE} SET order_id = $2, customer_id = $3, status = $4, updated_at = $5 \
             WHERE id = $1 AND {LIVE}"
        );

        let result = sqlx::query(&sql)
            .bind(&row.id)
            .bind(&row.order_id)
            .bind(&row.customer_id)
            .bind(&row.status)
            .bind(row.updated_at)
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(OrderError::not_found());
        }

        tracing::debug!(order_id = %row.id, "Updated order row");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), OrderError> {
        let sql = format!("UPDATE {TABLE} SET deleted_at = $2 WHERE id = $1 AND {LIVE}");

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(storage)?;

        if result.rows_affected() == 0 {
            return Err(OrderError::not_found());
        }

        tracing::debug!(order_id = %id, "Soft-deleted order row");
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
//
// Queries against a live database are in tests/postgres_repository.rs.
//
// ============================================================================
