//! Chart of accounts.
//!
//! This module maintains the account hierarchy:
//! - Account, type and posting-role definitions
//! - Hierarchical code generation
//! - Forest construction with orphan and cycle handling
//! - The default chart seeded into a new tenant
//! - Validation applied before accounts are written

pub mod code;
pub mod defaults;
pub mod error;
pub mod service;
pub mod tree;
pub mod types;

#[cfg(test)]
mod chart_props;

pub use code::{code_rank, generate_new_code};
pub use defaults::{DEFAULT_CHART, DefaultAccount, default_chart};
pub use error::ChartError;
pub use service::ChartService;
pub use tree::{accounts_by_type, build_tree, sorted_by_code};
pub use types::{Account, AccountNode, AccountRole, AccountType, NewAccount};
