//! Property-based tests for code generation and tree building.

use std::collections::HashSet;

use mizan_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::code::generate_new_code;
use super::tree::build_tree;
use super::types::{Account, AccountNode, AccountType};

/// Strategy for an account type.
fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    prop_oneof![
        Just(AccountType::Asset),
        Just(AccountType::Liability),
        Just(AccountType::Equity),
        Just(AccountType::Revenue),
        Just(AccountType::Expense),
    ]
}

/// Strategy for a code: mostly numeric, sometimes not.
fn code_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (1u32..5000).prop_map(|n| n.to_string()),
        1 => "[A-Z]{1,3}",
    ]
}

/// Strategy for an arbitrary account set. Parent links point anywhere,
/// including at a missing account, the account itself, or forming cycles.
fn accounts_strategy() -> impl Strategy<Value = Vec<Account>> {
    prop::collection::vec(
        (
            code_strategy(),
            account_type_strategy(),
            prop::option::of(0usize..40),
        ),
        0..30,
    )
    .prop_map(|specs| {
        let ids: Vec<AccountId> = specs.iter().map(|_| AccountId::new()).collect();
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (code, account_type, parent))| Account {
                id: ids[i],
                code,
                name: format!("Account {i}"),
                account_type,
                parent_id: parent.map(|p| ids.get(p).copied().unwrap_or_else(AccountId::new)),
                balance: Decimal::ZERO,
                role: None,
            })
            .collect()
    })
}

fn count(nodes: &[AccountNode]) -> usize {
    nodes.iter().map(AccountNode::len).sum()
}

fn collect_ids(nodes: &[AccountNode], out: &mut HashSet<AccountId>) {
    for node in nodes {
        out.insert(node.account.id);
        collect_ids(&node.children, out);
    }
}

fn siblings_sorted(nodes: &[AccountNode]) -> bool {
    nodes
        .windows(2)
        .all(|w| w[0].account.code <= w[1].account.code)
        && nodes.iter().all(|n| siblings_sorted(&n.children))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Generated codes never collide with an existing code.
    #[test]
    fn prop_generated_code_is_unused(
        accounts in accounts_strategy(),
        parent_pick in prop::option::of(0usize..40),
        account_type in account_type_strategy(),
    ) {
        let parent_id = parent_pick.and_then(|p| accounts.get(p).map(|a| a.id));
        let code = generate_new_code(&accounts, parent_id, account_type);
        prop_assert!(!accounts.iter().any(|a| a.code == code), "code {} already used", code);
    }

    /// Code generation is deterministic for the same input.
    #[test]
    fn prop_generated_code_is_deterministic(
        accounts in accounts_strategy(),
        parent_pick in prop::option::of(0usize..40),
        account_type in account_type_strategy(),
    ) {
        let parent_id = parent_pick.and_then(|p| accounts.get(p).map(|a| a.id));
        let first = generate_new_code(&accounts, parent_id, account_type);
        let second = generate_new_code(&accounts, parent_id, account_type);
        prop_assert_eq!(first, second);
    }

    /// The forest contains every account exactly once.
    #[test]
    fn prop_tree_preserves_every_account(accounts in accounts_strategy()) {
        let tree = build_tree(&accounts);
        prop_assert_eq!(count(&tree), accounts.len());

        let mut seen = HashSet::new();
        collect_ids(&tree, &mut seen);
        prop_assert_eq!(seen.len(), accounts.len());
    }

    /// Accounts whose parent does not resolve are roots.
    #[test]
    fn prop_orphans_are_roots(accounts in accounts_strategy()) {
        let known: HashSet<AccountId> = accounts.iter().map(|a| a.id).collect();
        let roots: HashSet<AccountId> = build_tree(&accounts).iter().map(|n| n.account.id).collect();
        for account in &accounts {
            let orphan = account.parent_id.is_none_or(|p| !known.contains(&p));
            if orphan {
                prop_assert!(roots.contains(&account.id));
            }
        }
    }

    /// Every sibling list is ordered by code.
    #[test]
    fn prop_siblings_sorted_by_code(accounts in accounts_strategy()) {
        prop_assert!(siblings_sorted(&build_tree(&accounts)));
    }
}
