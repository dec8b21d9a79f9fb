//! Business logic services for the application layer.

pub mod resolution_service;
pub mod shortening_service;

pub use resolution_service::ResolutionService;
pub use shortening_service::ShorteningService;

use crate::error::AppError;
use std::future::Future;
use std::time::Duration;

/// Runs `operation` with a deadline.
///
/// Dropping the future on timeout cancels it at its current await point.
pub(crate) async fn run_within<T, F>(timeout: Duration, operation: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!("Operation exceeded deadline of {:?}", timeout);
            Err(AppError::unavailable("Request timed out"))
        }
    }
}
