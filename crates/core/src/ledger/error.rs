//! Ledger error types.

use mizan_shared::AppError;
use mizan_shared::types::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when a journal entry fails validation.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Description is blank.
    #[error("Journal entry description is required")]
    EmptyDescription,

    /// Entry has no lines.
    #[error("Journal entry must have at least one item")]
    NoItems,

    /// A line carries a negative amount.
    #[error("Amounts cannot be negative (account {0})")]
    NegativeAmount(AccountId),

    /// A line sets both debit and credit.
    #[error("Item for account {0} must be either a debit or a credit, not both")]
    BothSides(AccountId),

    /// Debits and credits differ.
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit.
        debit: Decimal,
        /// Total credit.
        credit: Decimal,
    },

    /// A line carries more than the per-line ceiling.
    #[error("Amount for account {0} exceeds the allowed maximum")]
    AmountTooLarge(AccountId),

    /// Column totals left the representable range.
    #[error("Journal entry totals overflow")]
    AmountOverflow,

    /// Entry moves no value.
    #[error("Journal entry total cannot be zero")]
    ZeroTotal,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::NoItems => "NO_ITEMS",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::BothSides(_) => "INVALID_ENTRY_TYPE",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::ZeroTotal => "ZERO_AMOUNT",
            Self::AmountTooLarge(_) | Self::AmountOverflow => "AMOUNT_OUT_OF_RANGE",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::NoItems.error_code(), "NO_ITEMS");
        assert_eq!(LedgerError::ZeroTotal.error_code(), "ZERO_AMOUNT");
        assert_eq!(
            LedgerError::Unbalanced {
                debit: Decimal::ONE,
                credit: Decimal::ZERO,
            }
            .error_code(),
            "UNBALANCED_ENTRY"
        );
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::Unbalanced {
            debit: Decimal::new(10000, 2),
            credit: Decimal::new(5000, 2),
        };
        assert_eq!(
            err.to_string(),
            "Journal entry is not balanced. Debit: 100.00, Credit: 50.00"
        );
    }

    #[test]
    fn test_maps_to_validation() {
        let app: AppError = LedgerError::EmptyDescription.into();
        assert_eq!(app.error_code(), "VALIDATION_ERROR");
    }
}
