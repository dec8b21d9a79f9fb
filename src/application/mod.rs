//! Application layer services implementing business logic.
//!
//! Services coordinate the domain ports (mapping store, resolution cache,
//! clock, code generator) and expose the two operations the HTTP layer needs.
//!
//! # Available Services
//!
//! - [`services::shortening_service::ShorteningService`] - Short link creation
//! - [`services::resolution_service::ResolutionService`] - Cache-aside code resolution

pub mod services;
