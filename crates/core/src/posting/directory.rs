//! Role and id based account lookup.

use mizan_shared::types::AccountId;

use super::error::PostingError;
use crate::chart::{Account, AccountRole};

/// Read-only view over the chart used to resolve posting accounts.
#[derive(Debug, Clone, Copy)]
pub struct AccountDirectory<'a> {
    accounts: &'a [Account],
}

impl<'a> AccountDirectory<'a> {
    /// Wraps a chart snapshot.
    #[must_use]
    pub const fn new(accounts: &'a [Account]) -> Self {
        Self { accounts }
    }

    /// Finds the account tagged with `role`.
    ///
    /// When several accounts carry the role, the one with the lowest code wins.
    ///
    /// # Errors
    ///
    /// Returns `MissingAccount` if no account carries the role.
    pub fn by_role(&self, role: AccountRole) -> Result<&'a Account, PostingError> {
        self.accounts
            .iter()
            .filter(|a| a.role == Some(role))
            .min_by(|a, b| a.code.cmp(&b.code))
            .ok_or(PostingError::MissingAccount(role))
    }

    /// Finds an account by id.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccount` if the id does not resolve.
    pub fn by_id(&self, id: AccountId) -> Result<&'a Account, PostingError> {
        self.accounts
            .iter()
            .find(|a| a.id == id)
            .ok_or(PostingError::UnknownAccount(id))
    }
}
