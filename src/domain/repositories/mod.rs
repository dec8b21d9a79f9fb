//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations. Implementations live in
//! `crate::infrastructure::persistence`:
//!
//! - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL
//! - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - in-process fake
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod mapping_repository;

pub use mapping_repository::MappingRepository;

#[cfg(test)]
pub use mapping_repository::MockMappingRepository;
