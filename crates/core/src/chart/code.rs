//! Hierarchical account code generation.

use std::collections::HashSet;

use mizan_shared::types::AccountId;

use super::types::{Account, AccountType};

/// Parses a code as an integer rank. Codes that are not clean integers rank as 0.
#[must_use]
pub fn code_rank(code: &str) -> u128 {
    code.trim().parse::<u128>().unwrap_or(0)
}

/// Generates the next code for a new account.
///
/// - Under a parent with children: the highest child code plus one.
/// - Under a parent with no children: the parent code followed by `01`.
/// - At the root (or when the parent does not resolve): the highest root code
///   of the same type plus one, or the type's seed digit when there is none.
///
/// The candidate is then bumped until it collides with no existing code, so
/// the result is always unique within `accounts`.
#[must_use]
pub fn generate_new_code(
    accounts: &[Account],
    parent_id: Option<AccountId>,
    account_type: AccountType,
) -> String {
    let parent = parent_id.and_then(|id| accounts.iter().find(|a| a.id == id));

    let candidate = match parent {
        Some(parent) => {
            let children: Vec<&Account> = accounts
                .iter()
                .filter(|a| a.parent_id == Some(parent.id))
                .collect();
            if children.is_empty() {
                format!("{}01", parent.code)
            } else {
                next_after(children.iter().map(|a| a.code.as_str()))
            }
        }
        None => {
            let roots: Vec<&Account> = accounts
                .iter()
                .filter(|a| a.parent_id.is_none() && a.account_type == account_type)
                .collect();
            if roots.is_empty() {
                account_type.seed_code().to_string()
            } else {
                next_after(roots.iter().map(|a| a.code.as_str()))
            }
        }
    };

    let taken: HashSet<&str> = accounts.iter().map(|a| a.code.as_str()).collect();
    first_unused(candidate, &taken)
}

fn next_after<'a>(codes: impl Iterator<Item = &'a str>) -> String {
    let max = codes.map(code_rank).max().unwrap_or(0);
    max.saturating_add(1).to_string()
}

fn first_unused(mut candidate: String, taken: &HashSet<&str>) -> String {
    while taken.contains(candidate.as_str()) {
        candidate = match candidate.parse::<u128>().ok().and_then(|n| n.checked_add(1)) {
            Some(next) => next.to_string(),
            None => format!("{candidate}0"),
        };
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn account(code: &str, account_type: AccountType, parent_id: Option<AccountId>) -> Account {
        Account {
            id: AccountId::new(),
            code: code.to_string(),
            name: format!("Account {code}"),
            account_type,
            parent_id,
            balance: Decimal::ZERO,
            role: None,
        }
    }

    #[test]
    fn test_empty_chart_uses_seed_digit() {
        assert_eq!(generate_new_code(&[], None, AccountType::Asset), "1");
        assert_eq!(generate_new_code(&[], None, AccountType::Expense), "5");
    }

    #[test]
    fn test_root_increments_highest_root_of_same_type() {
        let accounts = vec![
            account("1", AccountType::Asset, None),
            account("2", AccountType::Liability, None),
        ];
        // Root asset "1" exists, so the next asset root is "2", which is
        // taken by the liability root and gets bumped.
        assert_eq!(generate_new_code(&accounts, None, AccountType::Asset), "3");
        assert_eq!(generate_new_code(&accounts, None, AccountType::Revenue), "4");
    }

    #[test]
    fn test_first_child_appends_01() {
        let parent = account("11", AccountType::Asset, None);
        let parent_id = parent.id;
        assert_eq!(
            generate_new_code(&[parent], Some(parent_id), AccountType::Asset),
            "1101"
        );
    }

    #[test]
    fn test_next_child_is_max_plus_one() {
        let parent = account("11", AccountType::Asset, None);
        let pid = parent.id;
        let accounts = vec![
            parent,
            account("111", AccountType::Asset, Some(pid)),
            account("114", AccountType::Asset, Some(pid)),
            account("112", AccountType::Asset, Some(pid)),
        ];
        assert_eq!(generate_new_code(&accounts, Some(pid), AccountType::Asset), "115");
    }

    #[test]
    fn test_unresolved_parent_falls_back_to_root_rule() {
        let accounts = vec![account("5", AccountType::Expense, None)];
        assert_eq!(
            generate_new_code(&accounts, Some(AccountId::new()), AccountType::Expense),
            "6"
        );
    }

    #[test]
    fn test_non_numeric_codes_rank_as_zero() {
        let parent = account("CASH", AccountType::Asset, None);
        let pid = parent.id;
        let accounts = vec![parent, account("CASH-A", AccountType::Asset, Some(pid))];
        assert_eq!(generate_new_code(&accounts, Some(pid), AccountType::Asset), "1");
        assert_eq!(code_rank("12x"), 0);
        assert_eq!(code_rank(" 42 "), 42);
    }

    #[test]
    fn test_candidate_skips_codes_used_elsewhere() {
        let parent = account("1", AccountType::Asset, None);
        let pid = parent.id;
        // "101" already exists as an unrelated root.
        let accounts = vec![parent, account("101", AccountType::Equity, None)];
        assert_eq!(generate_new_code(&accounts, Some(pid), AccountType::Asset), "102");
    }
}
