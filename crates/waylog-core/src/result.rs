//! Convenience result type alias for Waylog.

use crate::error::AppError;

/// A specialized `Result` type for Waylog operations.
pub type AppResult<T> = Result<T, AppError>;
