//! Custody repository: cash advanced to employees.

use mizan_core::chart::Account;
use mizan_core::ledger::JournalEntry;
use mizan_core::payroll::Employee;
use mizan_core::posting::{PostingError, PostingService};
use mizan_core::records::{CustodyBalance, CustodyMovement, NewCustodyMovement, custody_balances};
use mizan_shared::types::{CustodyMovementId, EmployeeId, JournalEntryId};
use mizan_shared::{AppError, TenantContext};
use tracing::info;

use super::journal::stage_entry;
use super::load_all;
use crate::store::{Collection, Document, SharedStore, StoreError, WriteBatch, to_fields};

/// Error types for custody operations.
#[derive(Debug, thiserror::Error)]
pub enum CustodyError {
    /// Employee not found.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    /// The journal entry could not be built.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<CustodyError> for AppError {
    fn from(err: CustodyError) -> Self {
        match err {
            CustodyError::EmployeeNotFound(_) => Self::NotFound(err.to_string()),
            CustodyError::Posting(e) => e.into(),
            CustodyError::Store(e) => e.into(),
        }
    }
}

/// Custody repository.
#[derive(Clone)]
pub struct CustodyRepository {
    store: SharedStore,
}

impl CustodyRepository {
    /// Creates a new custody repository.
    #[must_use]
    pub const fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Records a custody receipt or settlement and posts its entry in one batch.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The employee does not exist
    /// - The custody or cash account cannot be resolved
    /// - The amount is not positive
    pub async fn record_movement(
        &self,
        ctx: &TenantContext,
        input: NewCustodyMovement,
    ) -> Result<(CustodyMovement, JournalEntry), CustodyError> {
        let employee = self
            .store
            .get(ctx, Collection::Employees, &input.employee_id.to_string())
            .await?
            .as_ref()
            .map(Document::decode::<Employee>)
            .transpose()?
            .ok_or(CustodyError::EmployeeNotFound(input.employee_id))?;
        let accounts: Vec<Account> = load_all(&self.store, ctx, Collection::Accounts).await?;

        let mut movement = CustodyMovement {
            id: CustodyMovementId::new(),
            employee_id: employee.id,
            employee_name: employee.name,
            kind: input.kind,
            amount: input.amount,
            date: input.date,
            description: input.description,
            cash_account_id: input.cash_account_id,
            journal_entry_id: None,
        };
        let entry = JournalEntry::from_new(
            JournalEntryId::new(),
            PostingService::custody_entry(&accounts, &movement)?,
            true,
        );
        movement.journal_entry_id = Some(entry.id);

        let mut batch = WriteBatch::new();
        batch.create(Collection::Custody, movement.id.to_string(), to_fields(&movement)?);
        stage_entry(&mut batch, &entry)?;
        self.store.commit(ctx, batch).await?;

        info!(
            tenant_id = %ctx.tenant_id,
            movement_id = %movement.id,
            employee_id = %movement.employee_id,
            kind = ?movement.kind,
            amount = %movement.amount,
            "Custody movement recorded"
        );
        Ok((movement, entry))
    }

    /// Lists movements, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_movements(
        &self,
        ctx: &TenantContext,
    ) -> Result<Vec<CustodyMovement>, CustodyError> {
        let mut movements: Vec<CustodyMovement> =
            load_all(&self.store, ctx, Collection::Custody).await?;
        movements.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(movements)
    }

    /// Outstanding custody per employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn balances(&self, ctx: &TenantContext) -> Result<Vec<CustodyBalance>, CustodyError> {
        let employees: Vec<Employee> = load_all(&self.store, ctx, Collection::Employees).await?;
        let movements: Vec<CustodyMovement> =
            load_all(&self.store, ctx, Collection::Custody).await?;
        Ok(custody_balances(&employees, &movements))
    }
}
