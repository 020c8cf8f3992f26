//! Account repository for chart of accounts operations.

use std::collections::BTreeMap;

use mizan_core::chart::{
    Account, AccountNode, AccountRole, AccountType, ChartError, ChartService, NewAccount,
    accounts_by_type, build_tree, sorted_by_code,
};
use mizan_shared::types::AccountId;
use mizan_shared::{AppError, TenantContext};
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::load_all;
use crate::store::{Collection, Document, SharedStore, StoreError, WriteBatch, to_fields};

const DEFAULT_CHART_MARKER: &str = "default";

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Chart rule violated.
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(AccountId),

    /// Re-parenting would put the account under itself.
    #[error("Account {0} cannot be its own ancestor")]
    ParentCycle(AccountId),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Chart(e) => e.into(),
            AccountError::AccountNotFound(_) | AccountError::ParentNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            AccountError::ParentCycle(_) => Self::Validation(err.to_string()),
            AccountError::Store(e) => e.into(),
        }
    }
}

/// Input for updating an account.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// New name.
    pub name: Option<String>,
    /// New code.
    pub code: Option<String>,
    /// New type (only while the account has no children).
    pub account_type: Option<AccountType>,
    /// New parent; `Some(None)` makes the account a root.
    pub parent_id: Option<Option<AccountId>>,
    /// New role; `Some(None)` clears it.
    pub role: Option<Option<AccountRole>>,
}

/// Account repository for CRUD operations.
#[derive(Clone)]
pub struct AccountRepository {
    store: SharedStore,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Lists accounts in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_accounts(&self, ctx: &TenantContext) -> Result<Vec<Account>, AccountError> {
        Ok(load_all(&self.store, ctx, Collection::Accounts).await?)
    }

    /// Lists accounts sorted by code, as used by the ledger account picker.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_sorted(&self, ctx: &TenantContext) -> Result<Vec<Account>, AccountError> {
        Ok(sorted_by_code(&self.list_accounts(ctx).await?))
    }

    /// Groups accounts by type.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn accounts_by_type(
        &self,
        ctx: &TenantContext,
    ) -> Result<BTreeMap<AccountType, Vec<Account>>, AccountError> {
        Ok(accounts_by_type(&self.list_accounts(ctx).await?))
    }

    /// Builds the account forest.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn tree(&self, ctx: &TenantContext) -> Result<Vec<AccountNode>, AccountError> {
        Ok(build_tree(&self.list_accounts(ctx).await?))
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn find_account_by_id(
        &self,
        ctx: &TenantContext,
        id: AccountId,
    ) -> Result<Option<Account>, AccountError> {
        let doc = self
            .store
            .get(ctx, Collection::Accounts, &id.to_string())
            .await?;
        Ok(doc.as_ref().map(Document::decode::<Account>).transpose()?)
    }

    /// Creates an account, generating its code when none is given.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is blank or the code is taken
    /// - The parent does not exist
    /// - The store write fails
    pub async fn create_account(
        &self,
        ctx: &TenantContext,
        input: NewAccount,
    ) -> Result<Account, AccountError> {
        let existing = self.list_accounts(ctx).await?;
        if let Some(parent_id) = input.parent_id
            && !existing.iter().any(|a| a.id == parent_id)
        {
            return Err(AccountError::ParentNotFound(parent_id));
        }

        let account = ChartService::prepare_account(&existing, AccountId::new(), input)?;
        self.store
            .set(
                ctx,
                Collection::Accounts,
                &account.id.to_string(),
                to_fields(&account)?,
            )
            .await?;

        info!(
            tenant_id = %ctx.tenant_id,
            account_id = %account.id,
            code = %account.code,
            "Account created"
        );
        Ok(account)
    }

    /// Updates an account.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The account or new parent does not exist
    /// - The type changes while the account has children
    /// - The new code is taken or the new name is blank
    /// - The new parent is the account itself or one of its descendants
    pub async fn update_account(
        &self,
        ctx: &TenantContext,
        id: AccountId,
        input: UpdateAccountInput,
    ) -> Result<Account, AccountError> {
        let accounts = self.list_accounts(ctx).await?;
        let mut account = accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(AccountError::AccountNotFound(id))?;

        if let Some(new_type) = input.account_type {
            ChartService::ensure_type_change_allowed(&accounts, &account, new_type)?;
            account.account_type = new_type;
        }

        if let Some(name) = input.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ChartError::EmptyName.into());
            }
            account.name = name.to_string();
        }

        if let Some(code) = input.code {
            let code = code.trim().to_string();
            if code != account.code {
                if accounts.iter().any(|a| a.id != id && a.code == code) {
                    return Err(ChartError::DuplicateCode(code).into());
                }
                account.code = code;
            }
        }

        if let Some(parent_id) = input.parent_id {
            if let Some(pid) = parent_id {
                if !accounts.iter().any(|a| a.id == pid) {
                    return Err(AccountError::ParentNotFound(pid));
                }
                if is_descendant_or_self(&accounts, id, pid) {
                    return Err(AccountError::ParentCycle(id));
                }
            }
            account.parent_id = parent_id;
        }

        if let Some(role) = input.role {
            account.role = role;
        }

        // Whole-record write: a cleared role is absent from the body and a
        // field merge would keep the old one.
        self.store
            .set(ctx, Collection::Accounts, &id.to_string(), to_fields(&account)?)
            .await?;

        info!(tenant_id = %ctx.tenant_id, account_id = %id, "Account updated");
        Ok(account)
    }

    /// Seeds the default chart into an empty tenant as one batch.
    ///
    /// The batch also creates the tenant's `chartSeed` marker, so two
    /// seeds racing past the empty check cannot both commit.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySeeded` if the tenant has any account or a seed
    /// committed first; nothing is written in that case.
    pub async fn seed_default_chart(
        &self,
        ctx: &TenantContext,
    ) -> Result<Vec<Account>, AccountError> {
        let existing = self.list_accounts(ctx).await?;
        let plan = ChartService::seed_plan(&existing)?;

        let mut marker = Map::new();
        marker.insert("accounts".to_string(), Value::from(plan.len()));
        let mut batch = WriteBatch::new();
        batch.create(Collection::ChartSeed, DEFAULT_CHART_MARKER, marker);
        for account in &plan {
            batch.create(Collection::Accounts, account.id.to_string(), to_fields(account)?);
        }

        match self.store.commit(ctx, batch).await {
            Ok(()) => {}
            Err(StoreError::AlreadyExists {
                collection: Collection::ChartSeed,
                ..
            }) => {
                warn!(tenant_id = %ctx.tenant_id, "Default chart seeded concurrently");
                let existing = self.list_accounts(ctx).await?.len();
                return Err(ChartError::AlreadySeeded { existing }.into());
            }
            Err(e) => return Err(e.into()),
        }

        info!(tenant_id = %ctx.tenant_id, accounts = plan.len(), "Default chart seeded");
        Ok(plan)
    }
}

/// True when `candidate` is `id` or sits somewhere below it.
fn is_descendant_or_self(accounts: &[Account], id: AccountId, candidate: AccountId) -> bool {
    let mut current = Some(candidate);
    let mut steps = 0;
    while let Some(cur) = current {
        if cur == id {
            return true;
        }
        steps += 1;
        if steps > accounts.len() {
            return false;
        }
        current = accounts.iter().find(|a| a.id == cur).and_then(|a| a.parent_id);
    }
    false
}
