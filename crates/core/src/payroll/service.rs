//! Payroll batch calculation.

use chrono::{DateTime, Utc};
use mizan_shared::types::{EmployeeId, PayrollId};
use rust_decimal::Decimal;

use super::error::PayrollError;
use super::types::{
    Employee, Payroll, PayrollPeriod, PayrollStatus, Payslip, PayslipLine, PayslipRecord, Penalty,
    PenaltyKind, Reward,
};

/// Service for building payroll runs.
pub struct PayrollService;

impl PayrollService {
    /// Builds one employee's payslip for `period`.
    ///
    /// Only rewards and deduction penalties dated inside the period count;
    /// warnings never reduce pay.
    #[must_use]
    pub fn build_payslip(
        period: PayrollPeriod,
        employee: &Employee,
        rewards: &[Reward],
        penalties: &[Penalty],
    ) -> Payslip {
        let rewards: Vec<PayslipLine> = rewards
            .iter()
            .filter(|r| r.employee_id == employee.id && period.contains(r.date))
            .map(|r| PayslipLine {
                reason: r.reason.clone(),
                amount: r.amount,
            })
            .collect();

        let deductions: Vec<PayslipLine> = penalties
            .iter()
            .filter(|p| {
                p.employee_id == employee.id
                    && p.kind == PenaltyKind::Deduction
                    && period.contains(p.date)
            })
            .map(|p| PayslipLine {
                reason: p.reason.clone(),
                amount: p.amount,
            })
            .collect();

        let total_rewards: Decimal = rewards.iter().map(|l| l.amount).sum();
        let total_deductions: Decimal = deductions.iter().map(|l| l.amount).sum();

        Payslip {
            employee_id: employee.id,
            employee_name: employee.name.clone(),
            base_salary: employee.salary,
            rewards,
            penalties: deductions,
            total_rewards,
            total_deductions,
            net_salary: employee.salary + total_rewards - total_deductions,
        }
    }

    /// Builds a draft payroll run with one payslip per employee.
    #[must_use]
    pub fn build_payroll(
        id: PayrollId,
        period: PayrollPeriod,
        employees: &[Employee],
        rewards: &[Reward],
        penalties: &[Penalty],
        now: DateTime<Utc>,
    ) -> Payroll {
        let payslips: Vec<Payslip> = employees
            .iter()
            .map(|e| Self::build_payslip(period, e, rewards, penalties))
            .collect();
        let total_net_payable = payslips.iter().map(|p| p.net_salary).sum();

        Payroll {
            id,
            month: period.month,
            year: period.year,
            status: PayrollStatus::Draft,
            payslips,
            total_net_payable,
            created_at: now,
        }
    }

    /// Rejects a period that already has a run.
    ///
    /// # Errors
    ///
    /// Returns `PeriodExists` if any run in `existing` covers `period`.
    pub fn ensure_period_available(
        existing: &[Payroll],
        period: PayrollPeriod,
    ) -> Result<(), PayrollError> {
        if existing.iter().any(|p| p.period() == period) {
            return Err(PayrollError::PeriodExists(period));
        }
        Ok(())
    }

    /// Sorts runs newest period first.
    pub fn sort_newest_first(runs: &mut [Payroll]) {
        runs.sort_by(|a, b| b.period().cmp(&a.period()));
    }

    /// Collects an employee's payslips across runs, newest period first.
    #[must_use]
    pub fn employee_history(runs: &[Payroll], employee_id: EmployeeId) -> Vec<PayslipRecord> {
        let mut history: Vec<PayslipRecord> = runs
            .iter()
            .flat_map(|run| {
                run.payslips
                    .iter()
                    .filter(move |p| p.employee_id == employee_id)
                    .map(move |p| PayslipRecord {
                        payroll_id: run.id,
                        period: run.period(),
                        status: run.status,
                        payslip: p.clone(),
                    })
            })
            .collect();
        history.sort_by(|a, b| b.period.cmp(&a.period));
        history
    }
}
