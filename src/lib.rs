//! Order lifecycle service: validated creation, lookup, status filtering,
//! partial update and soft deletion of orders backed by PostgreSQL.

pub mod api;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod persistence;
pub mod utils;
