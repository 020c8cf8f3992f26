//! Payroll repository: one run per period, locked by a create-only marker.

use chrono::{DateTime, Utc};
use mizan_core::payroll::{
    Employee, Payroll, PayrollError, PayrollPeriod, PayrollService, PayrollStatus, PayslipRecord,
    Penalty, Reward,
};
use mizan_shared::types::{EmployeeId, PayrollId};
use mizan_shared::{AppError, TenantContext};
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::load_all;
use crate::store::{Collection, SharedStore, StoreError, WriteBatch, to_fields};

/// Error types for payroll operations.
#[derive(Debug, thiserror::Error)]
pub enum PayrollRunError {
    /// Payroll rule violated.
    #[error(transparent)]
    Payroll(#[from] PayrollError),

    /// Payroll run not found.
    #[error("Payroll not found: {0}")]
    PayrollNotFound(PayrollId),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<PayrollRunError> for AppError {
    fn from(err: PayrollRunError) -> Self {
        match err {
            PayrollRunError::Payroll(e) => e.into(),
            PayrollRunError::PayrollNotFound(_) => Self::NotFound(err.to_string()),
            PayrollRunError::Store(e) => e.into(),
        }
    }
}

/// Payroll repository.
#[derive(Clone)]
pub struct PayrollRepository {
    store: SharedStore,
}

impl PayrollRepository {
    /// Creates a new payroll repository.
    #[must_use]
    pub const fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Calculates and stores the draft run for `year`/`month`.
    ///
    /// The run and its period marker are written in one batch; the marker
    /// is create-only, so a concurrent run for the same period fails whole.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` for a month outside 1..=12 and `PeriodExists`
    /// if the period already has a run.
    pub async fn create_payroll(
        &self,
        ctx: &TenantContext,
        year: i32,
        month: u32,
        now: DateTime<Utc>,
    ) -> Result<Payroll, PayrollRunError> {
        let period = PayrollPeriod::new(year, month)?;

        let runs: Vec<Payroll> = load_all(&self.store, ctx, Collection::Payrolls).await?;
        PayrollService::ensure_period_available(&runs, period)?;

        let employees: Vec<Employee> = load_all(&self.store, ctx, Collection::Employees).await?;
        let rewards: Vec<Reward> = load_all(&self.store, ctx, Collection::Rewards).await?;
        let penalties: Vec<Penalty> = load_all(&self.store, ctx, Collection::Penalties).await?;

        let payroll = PayrollService::build_payroll(
            PayrollId::new(),
            period,
            &employees,
            &rewards,
            &penalties,
            now,
        );

        let mut lock = Map::new();
        lock.insert("payrollId".to_string(), Value::String(payroll.id.to_string()));
        let mut batch = WriteBatch::new();
        batch
            .create(Collection::PayrollPeriods, period.key(), lock)
            .create(Collection::Payrolls, payroll.id.to_string(), to_fields(&payroll)?);

        match self.store.commit(ctx, batch).await {
            Ok(()) => {}
            Err(StoreError::AlreadyExists {
                collection: Collection::PayrollPeriods,
                ..
            }) => {
                warn!(tenant_id = %ctx.tenant_id, period = %period, "Payroll period taken concurrently");
                return Err(PayrollError::PeriodExists(period).into());
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            tenant_id = %ctx.tenant_id,
            payroll_id = %payroll.id,
            period = %period,
            employees = payroll.payslips.len(),
            total = %payroll.total_net_payable,
            "Payroll created"
        );
        Ok(payroll)
    }

    /// Moves a run to a new status.
    ///
    /// # Errors
    ///
    /// Returns `PayrollNotFound` if no such run exists.
    pub async fn set_status(
        &self,
        ctx: &TenantContext,
        id: PayrollId,
        status: PayrollStatus,
    ) -> Result<(), PayrollRunError> {
        let mut fields = Map::new();
        fields.insert(
            "status".to_string(),
            serde_json::to_value(status).map_err(StoreError::from)?,
        );
        match self
            .store
            .update(ctx, Collection::Payrolls, &id.to_string(), fields)
            .await
        {
            Ok(()) => {
                info!(tenant_id = %ctx.tenant_id, payroll_id = %id, status = ?status, "Payroll status changed");
                Ok(())
            }
            Err(StoreError::NotFound { .. }) => Err(PayrollRunError::PayrollNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists runs, newest period first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_payrolls(&self, ctx: &TenantContext) -> Result<Vec<Payroll>, PayrollRunError> {
        let mut runs: Vec<Payroll> = load_all(&self.store, ctx, Collection::Payrolls).await?;
        PayrollService::sort_newest_first(&mut runs);
        Ok(runs)
    }

    /// An employee's payslips across all runs, newest period first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn employee_history(
        &self,
        ctx: &TenantContext,
        employee_id: EmployeeId,
    ) -> Result<Vec<PayslipRecord>, PayrollRunError> {
        let runs: Vec<Payroll> = load_all(&self.store, ctx, Collection::Payrolls).await?;
        Ok(PayrollService::employee_history(&runs, employee_id))
    }
}
