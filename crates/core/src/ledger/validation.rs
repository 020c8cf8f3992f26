//! Business rule validation for journal entries.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::NewJournalEntry;

/// Largest amount a single line or asset may carry (10^15).
///
/// Report totals fold many such amounts; the ceiling keeps those sums far
/// below the range where `Decimal` arithmetic overflows.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Returns true when `amount` is not above [`MAX_AMOUNT`] in magnitude.
#[must_use]
pub fn within_limit(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// Column totals of a validated entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTotals {
    /// Total debit.
    pub debit: Decimal,
    /// Total credit.
    pub credit: Decimal,
}

/// Validates a journal entry before it is persisted.
///
/// Applies to manual and generated entries alike: a description, at least
/// one item, no negative amounts, no amount above [`MAX_AMOUNT`], no line
/// with both sides set, equal columns and a non-zero total.
///
/// # Errors
///
/// Returns the first rule the entry violates.
pub fn validate_entry(entry: &NewJournalEntry) -> Result<EntryTotals, LedgerError> {
    if entry.description.trim().is_empty() {
        return Err(LedgerError::EmptyDescription);
    }
    if entry.items.is_empty() {
        return Err(LedgerError::NoItems);
    }

    let mut debit = Decimal::ZERO;
    let mut credit = Decimal::ZERO;

    for item in &entry.items {
        if item.debit < Decimal::ZERO || item.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(item.account_id));
        }
        if !within_limit(item.debit) || !within_limit(item.credit) {
            return Err(LedgerError::AmountTooLarge(item.account_id));
        }
        if !item.debit.is_zero() && !item.credit.is_zero() {
            return Err(LedgerError::BothSides(item.account_id));
        }
        debit = debit.checked_add(item.debit).ok_or(LedgerError::AmountOverflow)?;
        credit = credit.checked_add(item.credit).ok_or(LedgerError::AmountOverflow)?;
    }

    if debit != credit {
        return Err(LedgerError::Unbalanced { debit, credit });
    }
    if debit.is_zero() {
        return Err(LedgerError::ZeroTotal);
    }

    Ok(EntryTotals { debit, credit })
}
