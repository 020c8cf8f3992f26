//! Account forest construction and grouping helpers.

use std::collections::{BTreeMap, HashMap};

use super::types::{Account, AccountNode, AccountType};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    OnPath,
    Done,
}

/// Builds the account forest.
///
/// Accounts without a parent, with a parent that does not resolve, or that
/// sit on a parent cycle become roots. Every level is sorted by code using
/// plain string ordering, so `"10"` sorts before `"2"`. No account is dropped.
#[must_use]
pub fn build_tree(accounts: &[Account]) -> Vec<AccountNode> {
    let index: HashMap<_, usize> = accounts
        .iter()
        .enumerate()
        .map(|(i, a)| (a.id, i))
        .collect();

    let mut parent: Vec<Option<usize>> = accounts
        .iter()
        .enumerate()
        .map(|(i, a)| {
            a.parent_id
                .and_then(|pid| index.get(&pid).copied())
                .filter(|&p| p != i)
        })
        .collect();

    break_cycles(&mut parent);

    let mut children: HashMap<Option<usize>, Vec<usize>> = HashMap::new();
    for (i, p) in parent.iter().enumerate() {
        children.entry(*p).or_default().push(i);
    }
    for list in children.values_mut() {
        list.sort_by(|&a, &b| accounts[a].code.cmp(&accounts[b].code));
    }

    children
        .get(&None)
        .map(|roots| {
            roots
                .iter()
                .map(|&i| assemble(i, accounts, &children))
                .collect()
        })
        .unwrap_or_default()
}

/// Detaches every account that lies on a parent cycle.
fn break_cycles(parent: &mut [Option<usize>]) {
    let mut state = vec![Visit::Unseen; parent.len()];

    for start in 0..parent.len() {
        let mut path = Vec::new();
        let mut cursor = Some(start);

        while let Some(node) = cursor {
            match state[node] {
                Visit::Done => break,
                Visit::OnPath => {
                    if let Some(pos) = path.iter().position(|&n| n == node) {
                        for &member in &path[pos..] {
                            parent[member] = None;
                        }
                    }
                    break;
                }
                Visit::Unseen => {
                    state[node] = Visit::OnPath;
                    path.push(node);
                    cursor = parent[node];
                }
            }
        }

        for node in path {
            state[node] = Visit::Done;
        }
    }
}

fn assemble(
    index: usize,
    accounts: &[Account],
    children: &HashMap<Option<usize>, Vec<usize>>,
) -> AccountNode {
    AccountNode {
        account: accounts[index].clone(),
        children: children
            .get(&Some(index))
            .map(|list| {
                list.iter()
                    .map(|&child| assemble(child, accounts, children))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Groups accounts by type, keeping input order within each group.
///
/// Every type is present in the result, possibly with an empty list.
#[must_use]
pub fn accounts_by_type(accounts: &[Account]) -> BTreeMap<AccountType, Vec<Account>> {
    let mut grouped: BTreeMap<AccountType, Vec<Account>> =
        AccountType::ALL.iter().map(|t| (*t, Vec::new())).collect();
    for account in accounts {
        grouped
            .entry(account.account_type)
            .or_default()
            .push(account.clone());
    }
    grouped
}

/// Returns the accounts sorted by code (string ordering).
#[must_use]
pub fn sorted_by_code(accounts: &[Account]) -> Vec<Account> {
    let mut sorted = accounts.to_vec();
    sorted.sort_by(|a, b| a.code.cmp(&b.code));
    sorted
}
