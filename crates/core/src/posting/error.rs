//! Posting error types.

use mizan_shared::AppError;
use mizan_shared::types::{AccountId, AssetId};
use thiserror::Error;

use crate::chart::AccountRole;
use crate::ledger::LedgerError;

/// Errors raised while generating an automatic journal entry.
///
/// Any of these aborts the whole posting: no business record and no entry
/// is written.
#[derive(Debug, Error)]
pub enum PostingError {
    // ========== Lookup Errors ==========
    /// No account carries the required role.
    #[error("No account with role '{0}' exists; create the required accounts first")]
    MissingAccount(AccountRole),

    /// An explicitly chosen account does not exist.
    #[error("Account not found: {0}")]
    UnknownAccount(AccountId),

    // ========== Rule Errors ==========
    /// Depreciation was already posted for the asset this year.
    #[error("Depreciation for asset {asset_id} was already posted in {year}")]
    AlreadyDepreciated {
        /// Asset.
        asset_id: AssetId,
        /// Calendar year of the existing run.
        year: i32,
    },

    /// Disposed assets are not depreciated.
    #[error("Asset {0} is disposed")]
    AssetDisposed(AssetId),

    /// The generated entry failed ledger validation.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl PostingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAccount(_) => "MISSING_ROLE_ACCOUNT",
            Self::UnknownAccount(_) => "ACCOUNT_NOT_FOUND",
            Self::AlreadyDepreciated { .. } => "ALREADY_DEPRECIATED",
            Self::AssetDisposed(_) => "ASSET_DISPOSED",
            Self::Ledger(inner) => inner.error_code(),
        }
    }
}

impl From<PostingError> for AppError {
    fn from(err: PostingError) -> Self {
        match err {
            PostingError::MissingAccount(_) | PostingError::UnknownAccount(_) => {
                Self::NotFound(err.to_string())
            }
            PostingError::AlreadyDepreciated { .. } => Self::Conflict(err.to_string()),
            PostingError::AssetDisposed(_) => Self::Validation(err.to_string()),
            PostingError::Ledger(inner) => inner.into(),
        }
    }
}
