//! Report generation service.
//!
//! Every report is a pure fold over the account list and the journal, and
//! is recomputed from scratch on each call. Stored account balances are
//! never consulted.

use mizan_shared::types::AccountId;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{
    BalanceSheet, CashFlowStatement, EquityStatement, FinancialStatements, GeneralLedger,
    IncomeStatement, LedgerLine, StatementLine, StatementSection, TrialBalance, TrialBalanceRow,
};
use crate::chart::{Account, AccountRole, AccountType};
use crate::ledger::{JournalEntry, JournalEntryType, account_totals};
use crate::posting::AccountDirectory;
use crate::records::FixedAsset;

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Generates the trial balance.
    ///
    /// Each account's debits and credits are netted and the magnitude is
    /// placed in the debit or credit column. Every account gets a row, sorted
    /// by code using string ordering. Items referencing unknown accounts are
    /// ignored.
    #[must_use]
    pub fn trial_balance(accounts: &[Account], entries: &[JournalEntry]) -> TrialBalance {
        let totals = account_totals(entries);

        let mut rows: Vec<TrialBalanceRow> = accounts
            .iter()
            .map(|account| {
                let t = totals.get(&account.id).copied().unwrap_or_default();
                TrialBalanceRow {
                    account_id: account.id,
                    code: account.code.clone(),
                    name: account.name.clone(),
                    account_type: account.account_type,
                    debit: t.debit_column(),
                    credit: t.credit_column(),
                }
            })
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));

        let total_debit: Decimal = rows.iter().map(|r| r.debit).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.credit).sum();

        TrialBalance {
            rows,
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Generates the general ledger for one account.
    ///
    /// Postings are sorted by date; postings on the same date keep journal
    /// order. The running balance starts at zero and adds debit minus credit.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn general_ledger(
        accounts: &[Account],
        entries: &[JournalEntry],
        account_id: AccountId,
    ) -> Result<GeneralLedger, ReportError> {
        let account = accounts
            .iter()
            .find(|a| a.id == account_id)
            .ok_or(ReportError::AccountNotFound(account_id))?;

        let mut postings: Vec<_> = entries
            .iter()
            .flat_map(|entry| {
                entry
                    .items
                    .iter()
                    .filter(|item| item.account_id == account_id)
                    .map(move |item| (entry, item))
            })
            .collect();
        postings.sort_by_key(|(entry, _)| entry.date);

        let mut running = Decimal::ZERO;
        let lines: Vec<LedgerLine> = postings
            .into_iter()
            .map(|(entry, item)| {
                running += item.debit - item.credit;
                LedgerLine {
                    entry_id: entry.id,
                    date: entry.date,
                    description: entry.description.clone(),
                    debit: item.debit,
                    credit: item.credit,
                    balance: running,
                }
            })
            .collect();

        Ok(GeneralLedger {
            account_id,
            code: account.code.clone(),
            name: account.name.clone(),
            lines,
            closing_balance: running,
        })
    }

    /// Generates the income statement.
    #[must_use]
    pub fn income_statement(accounts: &[Account], entries: &[JournalEntry]) -> IncomeStatement {
        Self::income_statement_from(&Self::trial_balance(accounts, entries))
    }

    /// Income statement from a computed trial balance.
    ///
    /// Revenue is the credit column of revenue accounts; expense is the
    /// debit column of expense accounts.
    #[must_use]
    pub fn income_statement_from(tb: &TrialBalance) -> IncomeStatement {
        let revenue = Self::section(tb, AccountType::Revenue, |r| r.credit);
        let expenses = Self::section(tb, AccountType::Expense, |r| r.debit);
        let total_revenue = revenue.total;
        let total_expense = expenses.total;

        IncomeStatement {
            revenue,
            expenses,
            total_revenue,
            total_expense,
            net_income: total_revenue - total_expense,
        }
    }

    /// Generates the balance sheet.
    #[must_use]
    pub fn balance_sheet(accounts: &[Account], entries: &[JournalEntry]) -> BalanceSheet {
        Self::balance_sheet_from(&Self::trial_balance(accounts, entries))
    }

    /// Balance sheet from a computed trial balance.
    ///
    /// The sheet does not force the equation to hold; `is_balanced` reports
    /// whether assets equal liabilities plus equity plus current earnings.
    #[must_use]
    pub fn balance_sheet_from(tb: &TrialBalance) -> BalanceSheet {
        let assets = Self::section(tb, AccountType::Asset, TrialBalanceRow::net);
        let liabilities = Self::section(tb, AccountType::Liability, |r| -r.net());
        let equity = Self::section(tb, AccountType::Equity, |r| -r.net());

        let current_earnings: Decimal = tb
            .rows
            .iter()
            .filter(|r| matches!(r.account_type, AccountType::Revenue | AccountType::Expense))
            .map(|r| -r.net())
            .sum();

        let total_assets = assets.total;
        let liabilities_and_equity = liabilities.total + equity.total + current_earnings;

        BalanceSheet {
            total_liabilities: liabilities.total.abs(),
            total_equity: equity.total.abs(),
            assets,
            liabilities,
            equity,
            total_assets,
            current_earnings,
            liabilities_and_equity,
            is_balanced: total_assets == liabilities_and_equity,
        }
    }

    /// Generates the cash flow statement.
    #[must_use]
    pub fn cash_flow(
        accounts: &[Account],
        entries: &[JournalEntry],
        assets: &[FixedAsset],
    ) -> CashFlowStatement {
        let tb = Self::trial_balance(accounts, entries);
        let income = Self::income_statement_from(&tb);
        Self::cash_flow_from(accounts, &tb, income.net_income, assets)
    }

    /// Cash flow statement from a computed trial balance and net income.
    ///
    /// Operating adds back the depreciation expense debit; investing is the
    /// negative of every asset purchase ever recorded; financing is the
    /// capital account's credit column. Missing role accounts contribute zero.
    #[must_use]
    pub fn cash_flow_from(
        accounts: &[Account],
        tb: &TrialBalance,
        net_income: Decimal,
        assets: &[FixedAsset],
    ) -> CashFlowStatement {
        let depreciation = Self::role_row(accounts, tb, AccountRole::DepreciationExpense)
            .map_or(Decimal::ZERO, |r| r.debit);
        let financing = Self::role_row(accounts, tb, AccountRole::Capital)
            .map_or(Decimal::ZERO, |r| r.credit);
        let investing = -assets.iter().map(|a| a.purchase_price).sum::<Decimal>();
        let operating = net_income + depreciation;

        CashFlowStatement {
            net_income,
            depreciation,
            operating,
            investing,
            financing,
            net_change: operating + investing + financing,
        }
    }

    /// Generates the statement of changes in equity.
    #[must_use]
    pub fn changes_in_equity(accounts: &[Account], entries: &[JournalEntry]) -> EquityStatement {
        let income = Self::income_statement(accounts, entries);
        Self::changes_in_equity_from(accounts, entries, income.net_income)
    }

    /// Statement of changes in equity for a known net income.
    ///
    /// Beginning equity is credit minus debit over equity-account items of
    /// opening entries.
    #[must_use]
    pub fn changes_in_equity_from(
        accounts: &[Account],
        entries: &[JournalEntry],
        net_income: Decimal,
    ) -> EquityStatement {
        let beginning_equity: Decimal = entries
            .iter()
            .filter(|e| e.entry_type == JournalEntryType::Opening)
            .flat_map(|e| &e.items)
            .filter(|item| {
                accounts
                    .iter()
                    .any(|a| a.id == item.account_id && a.account_type == AccountType::Equity)
            })
            .map(|item| item.credit - item.debit)
            .sum();

        EquityStatement {
            beginning_equity,
            net_income,
            ending_equity: beginning_equity + net_income,
        }
    }

    /// Computes every statement from one snapshot.
    #[must_use]
    pub fn financial_statements(
        accounts: &[Account],
        entries: &[JournalEntry],
        assets: &[FixedAsset],
    ) -> FinancialStatements {
        let trial_balance = Self::trial_balance(accounts, entries);
        let income_statement = Self::income_statement_from(&trial_balance);
        let balance_sheet = Self::balance_sheet_from(&trial_balance);
        let cash_flow =
            Self::cash_flow_from(accounts, &trial_balance, income_statement.net_income, assets);
        let changes_in_equity =
            Self::changes_in_equity_from(accounts, entries, income_statement.net_income);

        FinancialStatements {
            trial_balance,
            income_statement,
            balance_sheet,
            cash_flow,
            changes_in_equity,
        }
    }

    fn section(
        tb: &TrialBalance,
        account_type: AccountType,
        amount: impl Fn(&TrialBalanceRow) -> Decimal,
    ) -> StatementSection {
        let accounts: Vec<StatementLine> = tb
            .rows_of(account_type)
            .map(|r| StatementLine {
                account_id: r.account_id,
                code: r.code.clone(),
                name: r.name.clone(),
                amount: amount(r),
            })
            .collect();
        StatementSection {
            total: accounts.iter().map(|l| l.amount).sum(),
            accounts,
        }
    }

    fn role_row<'a>(
        accounts: &[Account],
        tb: &'a TrialBalance,
        role: AccountRole,
    ) -> Option<&'a TrialBalanceRow> {
        let account = AccountDirectory::new(accounts).by_role(role).ok()?;
        tb.row(account.id)
    }
}
