//! Persistence layer for Mizan.
//!
//! This crate provides:
//! - The tenant-scoped [`DocumentStore`](store::DocumentStore) seam and its
//!   in-memory implementation
//! - Repositories that run the core rules and persist the results
//! - A live [`ReportFeed`](live::ReportFeed) over the ledger

pub mod live;
pub mod repositories;
pub mod store;

pub use live::{ReportFeed, Statements, compute_statements};
pub use repositories::{
    AccountRepository, AssetRepository, CustodyRepository, ExpenseRepository, HrRepository,
    JournalRepository, PayrollRepository, SalesRepository,
};
pub use store::{Collection, DocumentStore, MemoryStore, SharedStore, StoreError, WriteBatch};

use mizan_shared::LedgerConfig;

/// Every repository, sharing one store.
#[derive(Clone)]
pub struct Repositories {
    /// Chart of accounts.
    pub accounts: AccountRepository,
    /// Journal entries.
    pub journal: JournalRepository,
    /// Expenses.
    pub expenses: ExpenseRepository,
    /// Employee custody.
    pub custody: CustodyRepository,
    /// Fixed assets.
    pub assets: AssetRepository,
    /// Customers, invoices and receipts.
    pub sales: SalesRepository,
    /// Employees, rewards and penalties.
    pub hr: HrRepository,
    /// Payroll runs.
    pub payroll: PayrollRepository,
}

impl Repositories {
    /// Wires every repository to `store`.
    #[must_use]
    pub fn new(store: &SharedStore, config: &LedgerConfig) -> Self {
        Self {
            accounts: AccountRepository::new(store.clone()),
            journal: JournalRepository::new(store.clone()),
            expenses: ExpenseRepository::new(store.clone()),
            custody: CustodyRepository::new(store.clone()),
            assets: AssetRepository::new(store.clone(), config.clone()),
            sales: SalesRepository::new(store.clone(), config.receipt_credit_target),
            hr: HrRepository::new(store.clone()),
            payroll: PayrollRepository::new(store.clone()),
        }
    }
}
