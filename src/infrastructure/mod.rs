//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the ports the services depend on.
//!
//! # Modules
//!
//! - [`cache`] - Resolution cache backends (Redis, in-memory, no-op)
//! - [`persistence`] - Mapping store backends (PostgreSQL, in-memory)

pub mod cache;
pub mod persistence;
