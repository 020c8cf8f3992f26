//! Derived account balances.
//!
//! Balances are always folded from journal entry items. The `balance`
//! field stored on an account is never read here.

use std::collections::HashMap;

use mizan_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::JournalEntry;

/// Accumulated debit and credit for one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTotals {
    /// Sum of debits.
    pub debit: Decimal,
    /// Sum of credits.
    pub credit: Decimal,
}

impl AccountTotals {
    /// Debit minus credit.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }

    /// The net amount in the debit column (zero when net credit).
    #[must_use]
    pub fn debit_column(&self) -> Decimal {
        self.net().max(Decimal::ZERO)
    }

    /// The net amount in the credit column (zero when net debit).
    #[must_use]
    pub fn credit_column(&self) -> Decimal {
        (-self.net()).max(Decimal::ZERO)
    }
}

/// Sums debits and credits per account over every item of every entry.
#[must_use]
pub fn account_totals(entries: &[JournalEntry]) -> HashMap<AccountId, AccountTotals> {
    let mut totals: HashMap<AccountId, AccountTotals> = HashMap::new();
    for item in entries.iter().flat_map(|e| &e.items) {
        let slot = totals.entry(item.account_id).or_default();
        slot.debit += item.debit;
        slot.credit += item.credit;
    }
    totals
}
