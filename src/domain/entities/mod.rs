//! Core domain entities.
//!
//! - [`UrlMapping`] - A persisted short code to URL mapping
//! - [`NewUrlMapping`] - Insert payload, identity assigned by the store
//! - [`ShortenRequest`] / [`ShortenResult`] - Input and output of the shortening flow

pub mod shorten;
pub mod url_mapping;

pub use shorten::{ShortenRequest, ShortenResult, ShortenStatus};
pub use url_mapping::{NewUrlMapping, UrlMapping};
