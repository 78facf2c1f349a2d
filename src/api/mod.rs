//! REST API module.
//!
//! Handlers return the bare record (or array of records) on success and a
//! `{ "message": ... }` body on failure.

mod employees;
mod search;

pub use employees::*;
pub use search::*;

use crate::errors::AppError;

/// Response type shared by all handlers.
pub type ApiResult<T> = Result<T, AppError>;

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Method not allowed".to_string())
}
