// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each entity has its own subdirectory with:
// - Value objects
// - Entity
// - Errors
// - Repository contract
// - Service
//
// This layer knows nothing about PostgreSQL or HTTP.
//
// ============================================================================

pub mod order;
