//! Core accounting logic for Mizan.
//!
//! This crate contains pure business logic with ZERO store or transport dependencies.
//! All domain types, validation rules, and report derivations live here.
//!
//! # Modules
//!
//! - `chart` - Chart of accounts hierarchy, codes and the default chart
//! - `ledger` - Journal entries and double-entry validation
//! - `posting` - Journal entries generated from business events
//! - `records` - Expenses, custody, fixed assets and sales records
//! - `reports` - Trial balance, ledger and financial statements
//! - `payroll` - Payslip and payroll run calculation

pub mod chart;
pub mod ledger;
pub mod payroll;
pub mod posting;
pub mod records;
pub mod reports;
