//! Per-call deadline for store and cache operations.

use std::future::Future;
use std::time::Duration;

use apptwice_core::error::AppError;
use apptwice_core::result::AppResult;

/// Run a backend call, failing with `ServiceUnavailable` once `limit` elapses.
///
/// The timed-out future is dropped, which cancels the in-flight call.
pub async fn within<T, F>(limit: Duration, operation: &str, fut: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AppError::service_unavailable(format!(
            "{operation} timed out after {}ms",
            limit.as_millis()
        ))),
    }
}
