//! Expense records.

use chrono::NaiveDate;
use mizan_shared::types::{AccountId, ExpenseId, JournalEntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recorded expense, stored in the `expenses` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Store-assigned identifier.
    pub id: ExpenseId,
    /// Date the expense was incurred.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Expense account debited.
    pub expense_account_id: AccountId,
    /// Cash or bank account credited.
    pub payment_account_id: AccountId,
    /// Journal entry posted for this expense.
    #[serde(default)]
    pub journal_entry_id: Option<JournalEntryId>,
}

/// Input for recording an expense.
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// Date the expense was incurred.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Amount paid.
    pub amount: Decimal,
    /// Expense account debited.
    pub expense_account_id: AccountId,
    /// Cash or bank account credited.
    pub payment_account_id: AccountId,
}
