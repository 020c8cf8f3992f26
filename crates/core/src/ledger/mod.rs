//! Double-entry bookkeeping rules.
//!
//! This module implements the journal ledger:
//! - Journal entry and item types
//! - Validation applied before any entry is written
//! - Per-account debit/credit folding
//! - Error types for rejected entries

pub mod balance;
pub mod error;
pub mod types;
pub mod validation;

#[cfg(test)]
mod ledger_props;

pub use balance::{AccountTotals, account_totals};
pub use error::LedgerError;
pub use types::{
    JournalEntry, JournalEntryItem, JournalEntryType, NewJournalEntry, sort_newest_first,
};
pub use validation::{EntryTotals, MAX_AMOUNT, validate_entry, within_limit};
