//! Financial report generation.
//!
//! This module provides pure business logic for deriving reports from the
//! journal:
//! - Trial Balance
//! - General Ledger
//! - Income Statement
//! - Balance Sheet
//! - Cash Flow Statement
//! - Statement of Changes in Equity

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod reports_props;

pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
