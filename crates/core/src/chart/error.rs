//! Chart of accounts error types.

use mizan_shared::AppError;
use thiserror::Error;

/// Errors that can occur while maintaining the chart of accounts.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Account name is empty.
    #[error("Account name is required")]
    EmptyName,

    /// Account code is already used in this tenant.
    #[error("Account code already exists: {0}")]
    DuplicateCode(String),

    /// The default chart can only be seeded into an empty tenant.
    #[error("Chart of accounts already has {existing} accounts")]
    AlreadySeeded {
        /// Number of accounts already present.
        existing: usize,
    },

    /// Account type cannot change once the account has children.
    #[error("Account {0} has children; its type cannot change")]
    TypeLocked(String),
}

impl ChartError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "EMPTY_ACCOUNT_NAME",
            Self::DuplicateCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::AlreadySeeded { .. } => "CHART_ALREADY_SEEDED",
            Self::TypeLocked(_) => "ACCOUNT_TYPE_LOCKED",
        }
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        match err {
            ChartError::EmptyName | ChartError::TypeLocked(_) => Self::Validation(err.to_string()),
            ChartError::DuplicateCode(_) | ChartError::AlreadySeeded { .. } => {
                Self::Conflict(err.to_string())
            }
        }
    }
}
