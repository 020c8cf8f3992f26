//! Chart of accounts domain types.

use mizan_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The five top-level account classifications.
///
/// Asset and expense accounts carry debit-normal balances; liability,
/// equity and revenue accounts carry credit-normal balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned by the business.
    Asset,
    /// Obligations owed to others.
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// All account types in chart order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Returns the code a first root account of this type receives.
    #[must_use]
    pub const fn seed_code(self) -> &'static str {
        match self {
            Self::Asset => "1",
            Self::Liability => "2",
            Self::Equity => "3",
            Self::Revenue => "4",
            Self::Expense => "5",
        }
    }

    /// Returns true for asset and expense accounts.
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }
}

/// Stable tag identifying an account that posting rules depend on.
///
/// Posting generators resolve offsetting accounts through this tag, so
/// renaming an account never breaks automatic entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountRole {
    /// Cash on hand.
    Cash,
    /// Bank balances.
    Bank,
    /// Cash advanced to employees.
    EmployeeCustody,
    /// Amounts owed by customers.
    Receivables,
    /// Contra-asset accumulating depreciation of fixed assets.
    AccumulatedDepreciation,
    /// Amounts owed to suppliers.
    Payables,
    /// Owner's capital.
    Capital,
    /// Revenue from the main activity.
    OperatingRevenue,
    /// General and administrative expenses.
    GeneralExpenses,
    /// Periodic depreciation charge.
    DepreciationExpense,
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Cash => "cash",
            Self::Bank => "bank",
            Self::EmployeeCustody => "employee custody",
            Self::Receivables => "receivables",
            Self::AccumulatedDepreciation => "accumulated depreciation",
            Self::Payables => "payables",
            Self::Capital => "capital",
            Self::OperatingRevenue => "operating revenue",
            Self::GeneralExpenses => "general expenses",
            Self::DepreciationExpense => "depreciation expense",
        };
        f.write_str(name)
    }
}

/// A chart of accounts entry as stored in the `accounts` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Store-assigned identifier.
    pub id: AccountId,
    /// Hierarchical code, unique within the tenant.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Classification.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Parent account, `None` for a root.
    #[serde(default)]
    pub parent_id: Option<AccountId>,
    /// Cached balance. Advisory only; reports always derive balances from the ledger.
    #[serde(default)]
    pub balance: Decimal,
    /// Posting role, if the account backs an automatic entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<AccountRole>,
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Display name (required, non-blank).
    pub name: String,
    /// Classification.
    pub account_type: AccountType,
    /// Parent account, `None` for a root.
    pub parent_id: Option<AccountId>,
    /// Explicit code. Generated when `None`.
    pub code: Option<String>,
    /// Posting role.
    pub role: Option<AccountRole>,
}

/// A node in the account forest produced by [`build_tree`](super::build_tree).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountNode {
    /// The account at this node.
    pub account: Account,
    /// Direct children sorted by code.
    pub children: Vec<AccountNode>,
}

impl AccountNode {
    /// Counts this node and all of its descendants.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Self::len).sum::<usize>()
    }

    /// Always false: a node contains at least itself.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}
