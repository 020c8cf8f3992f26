//! Journal entry domain types.
//!
//! Journal entries are the single source of truth for every balance and
//! report. They are appended once and never edited.

use chrono::NaiveDate;
use mizan_shared::types::{AccountId, JournalEntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::within_limit;
use crate::chart::Account;

/// Journal entry classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalEntryType {
    /// Day-to-day posting.
    #[default]
    General,
    /// Opening balances; drives beginning equity.
    Opening,
    /// Period-end adjustment.
    Adjustment,
    /// Period-end closing.
    Closing,
}

/// One debit or credit line of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryItem {
    /// The account posted to.
    pub account_id: AccountId,
    /// Account name at posting time. Not updated if the account is renamed.
    pub account_name: String,
    /// Debit amount (zero for a credit line).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (zero for a debit line).
    #[serde(default)]
    pub credit: Decimal,
}

impl JournalEntryItem {
    /// Creates a debit line against `account`.
    #[must_use]
    pub fn debit(account: &Account, amount: Decimal) -> Self {
        Self {
            account_id: account.id,
            account_name: account.name.clone(),
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    /// Creates a credit line against `account`.
    #[must_use]
    pub fn credit(account: &Account, amount: Decimal) -> Self {
        Self {
            account_id: account.id,
            account_name: account.name.clone(),
            debit: Decimal::ZERO,
            credit: amount,
        }
    }

    /// Returns debit minus credit.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// A journal entry before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJournalEntry {
    /// Posting date.
    pub date: NaiveDate,
    /// Free-text description (required).
    pub description: String,
    /// Classification.
    pub entry_type: JournalEntryType,
    /// Id of the business record that produced this entry, if any.
    pub source_id: Option<String>,
    /// Lines; must balance.
    pub items: Vec<JournalEntryItem>,
}

impl NewJournalEntry {
    /// Total of the debit column.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.items.iter().map(|i| i.debit).sum()
    }

    /// Total of the credit column.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.items.iter().map(|i| i.credit).sum()
    }
}

/// A persisted journal entry as stored in the `journalEntries` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Store-assigned identifier.
    pub id: JournalEntryId,
    /// Posting date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Classification.
    #[serde(rename = "type", default)]
    pub entry_type: JournalEntryType,
    /// True when produced from a business event.
    #[serde(default)]
    pub is_auto_generated: bool,
    /// Originating business record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    /// Lines.
    pub items: Vec<JournalEntryItem>,
}

impl JournalEntry {
    /// Builds a stored entry from validated input.
    #[must_use]
    pub fn from_new(id: JournalEntryId, entry: NewJournalEntry, is_auto_generated: bool) -> Self {
        Self {
            id,
            date: entry.date,
            description: entry.description,
            entry_type: entry.entry_type,
            is_auto_generated,
            source_id: entry.source_id,
            items: entry.items,
        }
    }

    /// Display total (the debit column).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total_debit()
    }

    /// Total of the debit column.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        self.items.iter().map(|i| i.debit).sum()
    }

    /// Total of the credit column.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        self.items.iter().map(|i| i.credit).sum()
    }

    /// Returns true if the debit and credit columns are equal.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debit() == self.total_credit()
    }

    /// Returns true when every line amount is within [`MAX_AMOUNT`].
    ///
    /// [`MAX_AMOUNT`]: super::validation::MAX_AMOUNT
    #[must_use]
    pub fn amounts_within_limit(&self) -> bool {
        self.items
            .iter()
            .all(|i| within_limit(i.debit) && within_limit(i.credit))
    }
}

/// Sorts entries newest first. Entries on the same date keep their order.
pub fn sort_newest_first(entries: &mut [JournalEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}
