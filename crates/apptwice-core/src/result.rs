//! Convenience result type alias for AppTwice.

use crate::error::AppError;

/// A specialized `Result` type for AppTwice backend operations.
pub type AppResult<T> = Result<T, AppError>;
