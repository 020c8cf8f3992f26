//! Payroll error types.

use mizan_shared::AppError;
use thiserror::Error;

use super::types::PayrollPeriod;

/// Errors that can occur while running payroll.
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Month is outside 1..=12.
    #[error("Invalid payroll month: {0}")]
    InvalidMonth(u32),

    /// A payroll run already exists for the period.
    #[error("Payroll for {0} already exists")]
    PeriodExists(PayrollPeriod),
}

impl PayrollError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMonth(_) => "INVALID_PAYROLL_MONTH",
            Self::PeriodExists(_) => "PAYROLL_PERIOD_EXISTS",
        }
    }
}

impl From<PayrollError> for AppError {
    fn from(err: PayrollError) -> Self {
        match err {
            PayrollError::InvalidMonth(_) => Self::Validation(err.to_string()),
            PayrollError::PeriodExists(_) => Self::Conflict(err.to_string()),
        }
    }
}
