use sqlx::PgPool;

// ============================================================================
// Schema Bootstrap
// ============================================================================

const STATEMENTS: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS orders (
        id          TEXT PRIMARY KEY,
        order_id    TEXT NOT NULL,
        customer_id TEXT NOT NULL,
        status      TEXT NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL,
        updated_at  TIMESTAMPTZ NOT NULL,
        deleted_at  TIMESTAMPTZ NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_orders_status ON orders (status)",
    "CREATE INDEX IF NOT EXISTS idx_orders_deleted_at ON orders (deleted_at)",
];

/// Creates the `orders` table and its indexes. Safe to run repeatedly.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::info!("Database migration completed");
    Ok(())
}
