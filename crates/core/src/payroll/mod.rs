//! Payroll batch calculation.
//!
//! Folds the employee roster and the period's rewards and penalties into
//! payslips and a run total. Runs are unique per (year, month).

pub mod error;
pub mod service;
pub mod types;


pub use error::PayrollError;
pub use service::PayrollService;
pub use types::{
    Employee, Payroll, PayrollPeriod, PayrollStatus, Payslip, PayslipLine, PayslipRecord,
    Penalty, PenaltyKind, Reward,
};
