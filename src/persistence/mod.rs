// ============================================================================
// Persistence Layer - Order Repository Adapters
// ============================================================================
//
// - postgres   - `PgOrderRepository` over sqlx
// - memory     - `InMemoryOrderRepository` for tests and database-less runs
// - models     - `OrderRow`, the table mapping
// - migrations - idempotent schema bootstrap
//
// ============================================================================

mod memory;
mod migrations;
mod models;
mod postgres;

pub use memory::InMemoryOrderRepository;
pub use migrations::run_migrations;
pub use models::OrderRow;
pub use postgres::PgOrderRepository;
