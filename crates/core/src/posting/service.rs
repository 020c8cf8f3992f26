//! Journal entry generators for business events.
//!
//! Every generator is a pure function of the event and the current chart.
//! Each returns exactly one entry that has already passed ledger validation.

use chrono::{Datelike, NaiveDate};
use mizan_shared::ReceiptCreditTarget;

use super::directory::AccountDirectory;
use super::error::PostingError;
use crate::chart::{Account, AccountRole};
use crate::ledger::{
    JournalEntry, JournalEntryItem, JournalEntryType, LedgerError, NewJournalEntry, validate_entry,
};
use crate::records::{AssetStatus, CustodyKind, CustodyMovement, Expense, FixedAsset, ReceiptVoucher};

/// Service that turns business events into journal entries.
pub struct PostingService;

impl PostingService {
    /// Expense: debit the expense account, credit the payment account.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccount` if either account is missing, or a ledger
    /// error for a non-positive amount.
    pub fn expense_entry(
        accounts: &[Account],
        expense: &Expense,
    ) -> Result<NewJournalEntry, PostingError> {
        let directory = AccountDirectory::new(accounts);
        let expense_account = directory.by_id(expense.expense_account_id)?;
        let payment_account = directory.by_id(expense.payment_account_id)?;

        Self::finish(NewJournalEntry {
            date: expense.date,
            description: expense.description.clone(),
            entry_type: JournalEntryType::General,
            source_id: Some(expense.id.to_string()),
            items: vec![
                JournalEntryItem::debit(expense_account, expense.amount),
                JournalEntryItem::credit(payment_account, expense.amount),
            ],
        })
    }

    /// Custody: a receipt debits employee custody and credits cash; a
    /// settlement does the reverse.
    ///
    /// The movement's own cash account is used when set, otherwise the
    /// account with the cash role.
    ///
    /// # Errors
    ///
    /// Returns `MissingAccount` / `UnknownAccount` when an account cannot be
    /// resolved, or a ledger error for a non-positive amount.
    pub fn custody_entry(
        accounts: &[Account],
        movement: &CustodyMovement,
    ) -> Result<NewJournalEntry, PostingError> {
        let directory = AccountDirectory::new(accounts);
        let custody = directory.by_role(AccountRole::EmployeeCustody)?;
        let cash = match movement.cash_account_id {
            Some(id) => directory.by_id(id)?,
            None => directory.by_role(AccountRole::Cash)?,
        };

        let (items, label) = match movement.kind {
            CustodyKind::Receipt => (
                vec![
                    JournalEntryItem::debit(custody, movement.amount),
                    JournalEntryItem::credit(cash, movement.amount),
                ],
                "استلام عهدة",
            ),
            CustodyKind::Settlement => (
                vec![
                    JournalEntryItem::debit(cash, movement.amount),
                    JournalEntryItem::credit(custody, movement.amount),
                ],
                "تسوية عهدة",
            ),
        };

        Self::finish(NewJournalEntry {
            date: movement.date,
            description: format!("{label}: {}", movement.employee_name),
            entry_type: JournalEntryType::General,
            source_id: Some(movement.id.to_string()),
            items,
        })
    }

    /// Depreciation: debit depreciation expense, credit accumulated
    /// depreciation, for one year's straight-line charge, dated `on`.
    ///
    /// Unless `allow_repeat` is set, a second run for the same asset in the
    /// same calendar year is refused.
    ///
    /// # Errors
    ///
    /// Returns `AssetDisposed`, `AlreadyDepreciated`, `MissingAccount`, or a
    /// ledger error when the charge is zero or out of range.
    pub fn depreciation_entry(
        accounts: &[Account],
        entries: &[JournalEntry],
        asset: &FixedAsset,
        on: NaiveDate,
        allow_repeat: bool,
    ) -> Result<NewJournalEntry, PostingError> {
        if asset.status == AssetStatus::Disposed {
            return Err(PostingError::AssetDisposed(asset.id));
        }

        let source_id = asset.id.to_string();
        if !allow_repeat
            && entries.iter().any(|e| {
                e.is_auto_generated
                    && e.source_id.as_deref() == Some(source_id.as_str())
                    && e.date.year() == on.year()
            })
        {
            return Err(PostingError::AlreadyDepreciated {
                asset_id: asset.id,
                year: on.year(),
            });
        }

        let directory = AccountDirectory::new(accounts);
        let expense = directory.by_role(AccountRole::DepreciationExpense)?;
        let accumulated = directory.by_role(AccountRole::AccumulatedDepreciation)?;
        let amount = asset
            .annual_depreciation()
            .ok_or(LedgerError::AmountOverflow)?;

        Self::finish(NewJournalEntry {
            date: on,
            description: format!("إهلاك أصل: {}", asset.name),
            entry_type: JournalEntryType::General,
            source_id: Some(source_id),
            items: vec![
                JournalEntryItem::debit(expense, amount),
                JournalEntryItem::credit(accumulated, amount),
            ],
        })
    }

    /// Receipt voucher: debit the chosen cash/bank account, credit
    /// receivables or operating revenue depending on `target`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccount` / `MissingAccount` when an account cannot be
    /// resolved, or a ledger error for a non-positive amount.
    pub fn receipt_entry(
        accounts: &[Account],
        voucher: &ReceiptVoucher,
        target: ReceiptCreditTarget,
    ) -> Result<NewJournalEntry, PostingError> {
        let directory = AccountDirectory::new(accounts);
        let cash = directory.by_id(voucher.cash_account_id)?;
        let credit = match target {
            ReceiptCreditTarget::Receivables => directory.by_role(AccountRole::Receivables)?,
            ReceiptCreditTarget::Revenue => directory.by_role(AccountRole::OperatingRevenue)?,
        };

        Self::finish(NewJournalEntry {
            date: voucher.date,
            description: format!("سند قبض من: {}", voucher.customer_name),
            entry_type: JournalEntryType::General,
            source_id: Some(voucher.id.to_string()),
            items: vec![
                JournalEntryItem::debit(cash, voucher.amount),
                JournalEntryItem::credit(credit, voucher.amount),
            ],
        })
    }

    fn finish(entry: NewJournalEntry) -> Result<NewJournalEntry, PostingError> {
        validate_entry(&entry)?;
        Ok(entry)
    }
}
