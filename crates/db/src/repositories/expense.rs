//! Expense repository: each expense lands together with its journal entry.

use mizan_core::chart::Account;
use mizan_core::ledger::JournalEntry;
use mizan_core::posting::{PostingError, PostingService};
use mizan_core::records::{Expense, NewExpense};
use mizan_shared::types::{ExpenseId, JournalEntryId};
use mizan_shared::{AppError, TenantContext};
use tracing::info;

use super::journal::stage_entry;
use super::load_all;
use crate::store::{Collection, SharedStore, StoreError, WriteBatch, to_fields};

/// Error types for expense operations.
#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    /// The journal entry could not be built.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<ExpenseError> for AppError {
    fn from(err: ExpenseError) -> Self {
        match err {
            ExpenseError::Posting(e) => e.into(),
            ExpenseError::Store(e) => e.into(),
        }
    }
}

/// Expense repository.
#[derive(Clone)]
pub struct ExpenseRepository {
    store: SharedStore,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Records an expense and posts its entry in one batch.
    ///
    /// # Errors
    ///
    /// Returns a posting error if either account is unknown or the amount is
    /// not positive; nothing is written in that case.
    pub async fn record_expense(
        &self,
        ctx: &TenantContext,
        input: NewExpense,
    ) -> Result<(Expense, JournalEntry), ExpenseError> {
        let accounts: Vec<Account> = load_all(&self.store, ctx, Collection::Accounts).await?;

        let mut expense = Expense {
            id: ExpenseId::new(),
            date: input.date,
            description: input.description,
            amount: input.amount,
            expense_account_id: input.expense_account_id,
            payment_account_id: input.payment_account_id,
            journal_entry_id: None,
        };
        let entry = JournalEntry::from_new(
            JournalEntryId::new(),
            PostingService::expense_entry(&accounts, &expense)?,
            true,
        );
        expense.journal_entry_id = Some(entry.id);

        let mut batch = WriteBatch::new();
        batch.create(Collection::Expenses, expense.id.to_string(), to_fields(&expense)?);
        stage_entry(&mut batch, &entry)?;
        self.store.commit(ctx, batch).await?;

        info!(
            tenant_id = %ctx.tenant_id,
            expense_id = %expense.id,
            entry_id = %entry.id,
            amount = %expense.amount,
            "Expense recorded"
        );
        Ok((expense, entry))
    }

    /// Lists expenses, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_expenses(&self, ctx: &TenantContext) -> Result<Vec<Expense>, ExpenseError> {
        let mut expenses: Vec<Expense> = load_all(&self.store, ctx, Collection::Expenses).await?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }
}
