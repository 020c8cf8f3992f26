//! Application-wide error taxonomy.
//!
//! Domain crates keep their own precise error enums and map into these
//! categories at the boundary:
//! - validation failures are rejected before persistence
//! - lookup failures mean a required document or account is missing
//! - uniqueness violations are rejected before any write
//! - store failures are propagated, never retried

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required document or account could not be found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation (e.g., duplicate seed or payroll period).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The document store rejected a read or write.
    #[error("Store error: {0}")]
    Store(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Store(_) => "STORE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true when the caller may retry the same operation.
    ///
    /// Only transport failures qualify; the core itself never retries.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}
