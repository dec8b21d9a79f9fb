//! Domain layer: entities, policies and the ports the services depend on.
//!
//! Nothing in here talks to a database, a cache or the network. Concrete
//! adapters live in [`crate::infrastructure`].
//!
//! # Modules
//!
//! - [`entities`] - URL mappings and the shorten request/result pair
//! - [`repositories`] - Mapping store port
//! - [`expiry`] - Expiry policy
//! - [`clock`] - Injectable source of "now"

pub mod clock;
pub mod entities;
pub mod expiry;
pub mod repositories;
