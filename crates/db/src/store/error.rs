//! Store error types.

use mizan_shared::AppError;
use thiserror::Error;

use super::Collection;

/// Errors returned by a document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or rejected the call.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The addressed document does not exist.
    #[error("Document {id} not found in {collection}")]
    NotFound {
        /// Collection addressed.
        collection: Collection,
        /// Document id.
        id: String,
    },

    /// A create-only write hit an existing document.
    #[error("Document {id} already exists in {collection}")]
    AlreadyExists {
        /// Collection addressed.
        collection: Collection,
        /// Document id.
        id: String,
    },

    /// A document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The change stream ended.
    #[error("Subscription closed")]
    SubscriptionClosed,
}

impl StoreError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "STORE_UNAVAILABLE",
            Self::NotFound { .. } => "DOCUMENT_NOT_FOUND",
            Self::AlreadyExists { .. } => "DOCUMENT_EXISTS",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::SubscriptionClosed => "SUBSCRIPTION_CLOSED",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(_) | StoreError::SubscriptionClosed => {
                Self::Store(err.to_string())
            }
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::AlreadyExists { .. } => Self::Conflict(err.to_string()),
            StoreError::Serialization(_) => Self::Internal(err.to_string()),
        }
    }
}
