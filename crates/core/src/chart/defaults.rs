//! The default chart of accounts seeded into a new tenant.

use std::collections::HashMap;

use mizan_shared::types::AccountId;
use rust_decimal::Decimal;

use super::types::{Account, AccountRole, AccountType};

/// Definition of one account in the default chart.
#[derive(Debug, Clone, Copy)]
pub struct DefaultAccount {
    /// Account code.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Classification.
    pub account_type: AccountType,
    /// Code of the parent definition, `None` for a root.
    pub parent_code: Option<&'static str>,
    /// Posting role.
    pub role: Option<AccountRole>,
}

const fn def(
    code: &'static str,
    name: &'static str,
    account_type: AccountType,
    parent_code: Option<&'static str>,
    role: Option<AccountRole>,
) -> DefaultAccount {
    DefaultAccount {
        code,
        name,
        account_type,
        parent_code,
        role,
    }
}

/// The fixed default chart, parents before children.
pub const DEFAULT_CHART: [DefaultAccount; 17] = [
    def("1", "الأصول", AccountType::Asset, None, None),
    def("2", "الالتزامات", AccountType::Liability, None, None),
    def("3", "حقوق الملكية", AccountType::Equity, None, None),
    def("4", "الإيرادات", AccountType::Revenue, None, None),
    def("5", "المصروفات", AccountType::Expense, None, None),
    def("11", "الأصول المتداولة", AccountType::Asset, Some("1"), None),
    def("12", "الأصول الثابتة", AccountType::Asset, Some("1"), None),
    def("111", "الصندوق", AccountType::Asset, Some("11"), Some(AccountRole::Cash)),
    def("112", "البنك", AccountType::Asset, Some("11"), Some(AccountRole::Bank)),
    def(
        "113",
        "عهد الموظفين",
        AccountType::Asset,
        Some("11"),
        Some(AccountRole::EmployeeCustody),
    ),
    def(
        "114",
        "العملاء",
        AccountType::Asset,
        Some("11"),
        Some(AccountRole::Receivables),
    ),
    def(
        "129",
        "مجمع اهلاك الأصول الثابتة",
        AccountType::Asset,
        Some("12"),
        Some(AccountRole::AccumulatedDepreciation),
    ),
    def(
        "21",
        "الموردون",
        AccountType::Liability,
        Some("2"),
        Some(AccountRole::Payables),
    ),
    def(
        "31",
        "رأس المال",
        AccountType::Equity,
        Some("3"),
        Some(AccountRole::Capital),
    ),
    def(
        "41",
        "إيرادات النشاط",
        AccountType::Revenue,
        Some("4"),
        Some(AccountRole::OperatingRevenue),
    ),
    def(
        "51",
        "مصروفات عمومية وإدارية",
        AccountType::Expense,
        Some("5"),
        Some(AccountRole::GeneralExpenses),
    ),
    def(
        "511",
        "مصروف الاهلاك",
        AccountType::Expense,
        Some("51"),
        Some(AccountRole::DepreciationExpense),
    ),
];

/// Materializes the default chart with freshly allocated ids.
///
/// Every account starts with a zero balance and parents are linked by id,
/// so the whole chart can be written in one batch.
#[must_use]
pub fn default_chart() -> Vec<Account> {
    let ids: HashMap<&str, AccountId> = DEFAULT_CHART
        .iter()
        .map(|d| (d.code, AccountId::new()))
        .collect();

    DEFAULT_CHART
        .iter()
        .filter_map(|d| {
            let id = *ids.get(d.code)?;
            Some(Account {
                id,
                code: d.code.to_string(),
                name: d.name.to_string(),
                account_type: d.account_type,
                parent_id: d.parent_code.and_then(|p| ids.get(p).copied()),
                balance: Decimal::ZERO,
                role: d.role,
            })
        })
        .collect()
}
