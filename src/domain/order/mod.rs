// ============================================================================
// Order Domain - Business Logic for the Order Entity
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderStatus)
// - Entity and request payloads (Order, NewOrder, OrderUpdate)
// - Errors (OrderError, StorageError)
// - Repository contract (OrderRepository)
// - Service (OrderService)
//
// Storage adapters live in src/persistence/.
//
// ============================================================================

pub mod value_objects;
pub mod entity;
pub mod errors;
pub mod repository;
pub mod service;

// Re-export for convenience
pub use value_objects::*;
pub use entity::*;
pub use errors::*;
pub use repository::*;
pub use service::*;
