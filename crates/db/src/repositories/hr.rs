//! Employee roster with rewards and penalties feeding payroll.

use chrono::NaiveDate;
use mizan_core::ledger::within_limit;
use mizan_core::payroll::{Employee, Penalty, PenaltyKind, Reward};
use mizan_shared::types::{EmployeeId, PenaltyId, RewardId};
use mizan_shared::{AppError, TenantContext};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::info;

use super::load_all;
use crate::store::{Collection, SharedStore, StoreError, decode_all, to_fields};

/// Error types for employee operations.
#[derive(Debug, thiserror::Error)]
pub enum HrError {
    /// Employee name is blank.
    #[error("Employee name is required")]
    EmptyName,

    /// An amount or salary is negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// An amount or salary exceeds the ledger's amount ceiling.
    #[error("Amount exceeds the allowed maximum: {0}")]
    AmountTooLarge(Decimal),

    /// Employee not found.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<HrError> for AppError {
    fn from(err: HrError) -> Self {
        match err {
            HrError::EmptyName | HrError::NegativeAmount(_) | HrError::AmountTooLarge(_) => {
                Self::Validation(err.to_string())
            }
            HrError::EmployeeNotFound(_) => Self::NotFound(err.to_string()),
            HrError::Store(e) => e.into(),
        }
    }
}

/// Input for hiring an employee.
#[derive(Debug, Clone)]
pub struct CreateEmployeeInput {
    /// Full name.
    pub name: String,
    /// Monthly base salary.
    pub salary: Decimal,
}

/// Input for granting a reward.
#[derive(Debug, Clone)]
pub struct CreateRewardInput {
    /// Rewarded employee.
    pub employee_id: EmployeeId,
    /// Reason.
    pub reason: String,
    /// Amount.
    pub amount: Decimal,
    /// Date the reward applies to.
    pub date: NaiveDate,
}

/// Input for recording a penalty.
#[derive(Debug, Clone)]
pub struct CreatePenaltyInput {
    /// Penalized employee.
    pub employee_id: EmployeeId,
    /// Deduction or warning.
    pub kind: PenaltyKind,
    /// Reason.
    pub reason: String,
    /// Amount deducted; ignored for warnings.
    pub amount: Decimal,
    /// Date the penalty applies to.
    pub date: NaiveDate,
}

/// Employee repository.
#[derive(Clone)]
pub struct HrRepository {
    store: SharedStore,
}

impl HrRepository {
    /// Creates a new employee repository.
    #[must_use]
    pub const fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Adds an employee to the roster.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName`, `NegativeAmount` or `AmountTooLarge` for invalid
    /// input.
    pub async fn create_employee(
        &self,
        ctx: &TenantContext,
        input: CreateEmployeeInput,
    ) -> Result<Employee, HrError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(HrError::EmptyName);
        }
        ensure_amount(input.salary)?;

        let employee = Employee {
            id: EmployeeId::new(),
            name: name.to_string(),
            salary: input.salary,
        };
        self.store
            .set(ctx, Collection::Employees, &employee.id.to_string(), to_fields(&employee)?)
            .await?;

        info!(tenant_id = %ctx.tenant_id, employee_id = %employee.id, "Employee created");
        Ok(employee)
    }

    /// Lists the roster in hiring order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_employees(&self, ctx: &TenantContext) -> Result<Vec<Employee>, HrError> {
        Ok(load_all(&self.store, ctx, Collection::Employees).await?)
    }

    /// Records a reward.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound`, `NegativeAmount` or `AmountTooLarge`.
    pub async fn add_reward(
        &self,
        ctx: &TenantContext,
        input: CreateRewardInput,
    ) -> Result<Reward, HrError> {
        ensure_amount(input.amount)?;
        self.ensure_employee(ctx, input.employee_id).await?;

        let reward = Reward {
            id: RewardId::new(),
            employee_id: input.employee_id,
            reason: input.reason,
            amount: input.amount,
            date: input.date,
        };
        self.store
            .set(ctx, Collection::Rewards, &reward.id.to_string(), to_fields(&reward)?)
            .await?;

        info!(
            tenant_id = %ctx.tenant_id,
            employee_id = %reward.employee_id,
            amount = %reward.amount,
            "Reward recorded"
        );
        Ok(reward)
    }

    /// Records a penalty.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeNotFound`, `NegativeAmount` or `AmountTooLarge`.
    pub async fn add_penalty(
        &self,
        ctx: &TenantContext,
        input: CreatePenaltyInput,
    ) -> Result<Penalty, HrError> {
        ensure_amount(input.amount)?;
        self.ensure_employee(ctx, input.employee_id).await?;

        let penalty = Penalty {
            id: PenaltyId::new(),
            employee_id: input.employee_id,
            kind: input.kind,
            reason: input.reason,
            amount: input.amount,
            date: input.date,
        };
        self.store
            .set(ctx, Collection::Penalties, &penalty.id.to_string(), to_fields(&penalty)?)
            .await?;

        info!(
            tenant_id = %ctx.tenant_id,
            employee_id = %penalty.employee_id,
            kind = ?penalty.kind,
            "Penalty recorded"
        );
        Ok(penalty)
    }

    /// Lists every reward.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_rewards(&self, ctx: &TenantContext) -> Result<Vec<Reward>, HrError> {
        Ok(load_all(&self.store, ctx, Collection::Rewards).await?)
    }

    /// Lists every penalty.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_penalties(&self, ctx: &TenantContext) -> Result<Vec<Penalty>, HrError> {
        Ok(load_all(&self.store, ctx, Collection::Penalties).await?)
    }

    /// Lists one employee's rewards.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn rewards_for(
        &self,
        ctx: &TenantContext,
        employee_id: EmployeeId,
    ) -> Result<Vec<Reward>, HrError> {
        let docs = self
            .store
            .query_eq(ctx, Collection::Rewards, "employeeId", &employee_value(employee_id))
            .await?;
        Ok(decode_all(&docs)?)
    }

    /// Lists one employee's penalties.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn penalties_for(
        &self,
        ctx: &TenantContext,
        employee_id: EmployeeId,
    ) -> Result<Vec<Penalty>, HrError> {
        let docs = self
            .store
            .query_eq(ctx, Collection::Penalties, "employeeId", &employee_value(employee_id))
            .await?;
        Ok(decode_all(&docs)?)
    }

    async fn ensure_employee(&self, ctx: &TenantContext, id: EmployeeId) -> Result<(), HrError> {
        match self
            .store
            .get(ctx, Collection::Employees, &id.to_string())
            .await?
        {
            Some(_) => Ok(()),
            None => Err(HrError::EmployeeNotFound(id)),
        }
    }
}

fn employee_value(id: EmployeeId) -> Value {
    Value::String(id.to_string())
}

fn ensure_amount(amount: Decimal) -> Result<(), HrError> {
    if amount < Decimal::ZERO {
        return Err(HrError::NegativeAmount(amount));
    }
    if !within_limit(amount) {
        return Err(HrError::AmountTooLarge(amount));
    }
    Ok(())
}
