//! Report data types.

use chrono::NaiveDate;
use mizan_shared::types::{AccountId, JournalEntryId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::chart::AccountType;

/// One trial balance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalanceRow {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Net amount when debits exceed credits, else zero.
    pub debit: Decimal,
    /// Net amount when credits exceed debits, else zero.
    pub credit: Decimal,
}

impl TrialBalanceRow {
    /// Signed net: debit column minus credit column.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// Trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    /// One row per account, sorted by code.
    pub rows: Vec<TrialBalanceRow>,
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Whether the columns are equal.
    pub is_balanced: bool,
}

impl TrialBalance {
    /// Rows of one account type, in code order.
    pub fn rows_of(&self, account_type: AccountType) -> impl Iterator<Item = &TrialBalanceRow> {
        self.rows
            .iter()
            .filter(move |r| r.account_type == account_type)
    }

    /// Row for one account.
    #[must_use]
    pub fn row(&self, account_id: AccountId) -> Option<&TrialBalanceRow> {
        self.rows.iter().find(|r| r.account_id == account_id)
    }
}

/// One posting in an account's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerLine {
    /// Entry the posting belongs to.
    pub entry_id: JournalEntryId,
    /// Entry date.
    pub date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Running balance after this posting (debit minus credit).
    pub balance: Decimal,
}

/// General ledger for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneralLedger {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Postings in date order.
    pub lines: Vec<LedgerLine>,
    /// Balance after the last posting.
    pub closing_balance: Decimal,
}

/// One account line on a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementLine {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Amount shown for the account.
    pub amount: Decimal,
}

/// A titled group of statement lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatementSection {
    /// Section total.
    pub total: Decimal,
    /// Account lines in code order.
    pub accounts: Vec<StatementLine>,
}

/// Income statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeStatement {
    /// Revenue accounts (credit column).
    pub revenue: StatementSection,
    /// Expense accounts (debit column).
    pub expenses: StatementSection,
    /// Total revenue.
    pub total_revenue: Decimal,
    /// Total expense.
    pub total_expense: Decimal,
    /// Revenue minus expense.
    pub net_income: Decimal,
}

/// Balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSheet {
    /// Asset accounts; amounts are debit minus credit.
    pub assets: StatementSection,
    /// Liability accounts; amounts are credit minus debit.
    pub liabilities: StatementSection,
    /// Equity accounts; amounts are credit minus debit.
    pub equity: StatementSection,
    /// Net of all asset accounts. Contra assets reduce it.
    pub total_assets: Decimal,
    /// Magnitude of the liability net.
    pub total_liabilities: Decimal,
    /// Magnitude of the equity net.
    pub total_equity: Decimal,
    /// Earnings not yet closed to equity (revenue and expense credit minus debit).
    pub current_earnings: Decimal,
    /// Liabilities plus equity plus current earnings, signed.
    pub liabilities_and_equity: Decimal,
    /// Whether total assets equal liabilities plus equity plus current earnings.
    pub is_balanced: bool,
}

/// Simplified indirect-method cash flow statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashFlowStatement {
    /// Net income.
    pub net_income: Decimal,
    /// Depreciation added back.
    pub depreciation: Decimal,
    /// Net income plus depreciation.
    pub operating: Decimal,
    /// Negative sum of all asset purchase prices.
    pub investing: Decimal,
    /// Capital contributions.
    pub financing: Decimal,
    /// Operating plus investing plus financing.
    pub net_change: Decimal,
}

/// Statement of changes in equity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquityStatement {
    /// Equity from opening entries.
    pub beginning_equity: Decimal,
    /// Net income.
    pub net_income: Decimal,
    /// Beginning equity plus net income.
    pub ending_equity: Decimal,
}

/// Every statement, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialStatements {
    /// Trial balance.
    pub trial_balance: TrialBalance,
    /// Income statement.
    pub income_statement: IncomeStatement,
    /// Balance sheet.
    pub balance_sheet: BalanceSheet,
    /// Cash flow statement.
    pub cash_flow: CashFlowStatement,
    /// Statement of changes in equity.
    pub changes_in_equity: EquityStatement,
}
