//! Payroll domain types.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use mizan_shared::types::{EmployeeId, PayrollId, PenaltyId, RewardId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PayrollError;

/// An employee, stored in the `employees` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Store-assigned identifier.
    pub id: EmployeeId,
    /// Full name.
    pub name: String,
    /// Monthly base salary.
    pub salary: Decimal,
}

/// A one-off reward, stored in the `rewards` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    /// Store-assigned identifier.
    pub id: RewardId,
    /// Rewarded employee.
    pub employee_id: EmployeeId,
    /// Reason shown on the payslip.
    pub reason: String,
    /// Amount added to pay.
    #[serde(default)]
    pub amount: Decimal,
    /// Date the reward applies to.
    pub date: NaiveDate,
}

/// Penalty classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PenaltyKind {
    /// Reduces pay by the penalty amount.
    Deduction,
    /// Recorded only; no effect on pay.
    Warning,
}

/// A disciplinary record, stored in the `penalties` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Penalty {
    /// Store-assigned identifier.
    pub id: PenaltyId,
    /// Penalized employee.
    pub employee_id: EmployeeId,
    /// Classification.
    #[serde(rename = "type")]
    pub kind: PenaltyKind,
    /// Reason shown on the payslip.
    pub reason: String,
    /// Amount deducted (ignored for warnings).
    #[serde(default)]
    pub amount: Decimal,
    /// Date the penalty applies to.
    pub date: NaiveDate,
}

/// A payroll month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Calendar year.
    pub year: i32,
    /// Month, 1 through 12.
    pub month: u32,
}

impl PayrollPeriod {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` if `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, PayrollError> {
        if !(1..=12).contains(&month) {
            return Err(PayrollError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// Returns true if `date` falls in this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Deterministic key used to lock the period, e.g. `2024-05`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl std::fmt::Display for PayrollPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

/// Payroll run status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    /// Calculated, awaiting review.
    #[default]
    Draft,
    /// Reviewed and approved.
    Approved,
    /// Paid out.
    Paid,
}

/// A reward or deduction line on a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    /// Reason.
    pub reason: String,
    /// Amount.
    pub amount: Decimal,
}

/// One employee's pay for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payslip {
    /// Employee.
    pub employee_id: EmployeeId,
    /// Employee name at calculation time.
    pub employee_name: String,
    /// Base salary.
    pub base_salary: Decimal,
    /// Rewards in the period.
    pub rewards: Vec<PayslipLine>,
    /// Deductions in the period.
    pub penalties: Vec<PayslipLine>,
    /// Sum of rewards.
    pub total_rewards: Decimal,
    /// Sum of deductions.
    pub total_deductions: Decimal,
    /// base + rewards − deductions.
    pub net_salary: Decimal,
}

/// A payroll run, stored in the `payrolls` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    /// Store-assigned identifier.
    pub id: PayrollId,
    /// Month, 1 through 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Status.
    #[serde(default)]
    pub status: PayrollStatus,
    /// One payslip per employee.
    pub payslips: Vec<Payslip>,
    /// Sum of net salaries.
    pub total_net_payable: Decimal,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Payroll {
    /// The period this run covers.
    #[must_use]
    pub const fn period(&self) -> PayrollPeriod {
        PayrollPeriod {
            year: self.year,
            month: self.month,
        }
    }
}

/// A payslip together with the run it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayslipRecord {
    /// Run identifier.
    pub payroll_id: PayrollId,
    /// Period of the run.
    pub period: PayrollPeriod,
    /// Run status.
    pub status: PayrollStatus,
    /// The employee's payslip.
    pub payslip: Payslip,
}
