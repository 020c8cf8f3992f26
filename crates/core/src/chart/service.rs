//! Chart maintenance rules applied before any account is written.

use mizan_shared::types::AccountId;
use rust_decimal::Decimal;

use super::code::generate_new_code;
use super::defaults::default_chart;
use super::error::ChartError;
use super::types::{Account, AccountType, NewAccount};

/// Pure chart of accounts operations.
pub struct ChartService;

impl ChartService {
    /// Validates a new account and assigns its code.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` for a blank name and `DuplicateCode` when an
    /// explicit code is already used.
    pub fn prepare_account(
        existing: &[Account],
        id: AccountId,
        input: NewAccount,
    ) -> Result<Account, ChartError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ChartError::EmptyName);
        }

        let code = match input.code.map(|c| c.trim().to_string()) {
            Some(code) if !code.is_empty() => {
                if existing.iter().any(|a| a.code == code) {
                    return Err(ChartError::DuplicateCode(code));
                }
                code
            }
            _ => generate_new_code(existing, input.parent_id, input.account_type),
        };

        Ok(Account {
            id,
            code,
            name: name.to_string(),
            account_type: input.account_type,
            parent_id: input.parent_id,
            balance: Decimal::ZERO,
            role: input.role,
        })
    }

    /// Checks that an account's type may change to `new_type`.
    ///
    /// # Errors
    ///
    /// Returns `TypeLocked` if the account has children and the type differs.
    pub fn ensure_type_change_allowed(
        accounts: &[Account],
        account: &Account,
        new_type: AccountType,
    ) -> Result<(), ChartError> {
        if account.account_type == new_type {
            return Ok(());
        }
        if accounts.iter().any(|a| a.parent_id == Some(account.id)) {
            return Err(ChartError::TypeLocked(account.code.clone()));
        }
        Ok(())
    }

    /// Produces the default chart for an empty tenant.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySeeded` if any account exists.
    pub fn seed_plan(existing: &[Account]) -> Result<Vec<Account>, ChartError> {
        if !existing.is_empty() {
            return Err(ChartError::AlreadySeeded {
                existing: existing.len(),
            });
        }
        Ok(default_chart())
    }
}
