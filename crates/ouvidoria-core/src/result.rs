//! Convenience result type alias for Ouvidoria.

use crate::error::AppError;

/// A specialized `Result` type for audit log operations.
pub type AppResult<T> = Result<T, AppError>;
