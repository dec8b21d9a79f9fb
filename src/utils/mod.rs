//! Utility functions and helpers.
//!
//! - [`code_generator`] - Base-62 short code generation
//! - [`timestamp`] - Lenient ISO-8601 timestamp parsing for request bodies

pub mod code_generator;
pub mod timestamp;
