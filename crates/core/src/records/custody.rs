//! Employee custody (cash advances) and running balances.

use chrono::NaiveDate;
use mizan_shared::types::{AccountId, CustodyMovementId, EmployeeId, JournalEntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::payroll::Employee;

/// Direction of a custody movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustodyKind {
    /// Cash handed to the employee.
    Receipt,
    /// Employee returns cash or accounts for spending.
    Settlement,
}

/// A custody movement, stored in the `custody` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyMovement {
    /// Store-assigned identifier.
    pub id: CustodyMovementId,
    /// Employee holding the custody.
    pub employee_id: EmployeeId,
    /// Employee name at the time of the movement.
    pub employee_name: String,
    /// Direction.
    #[serde(rename = "type")]
    pub kind: CustodyKind,
    /// Amount moved.
    pub amount: Decimal,
    /// Movement date.
    pub date: NaiveDate,
    /// Optional note.
    #[serde(default)]
    pub description: String,
    /// Cash or bank account used instead of the default cash account.
    #[serde(default)]
    pub cash_account_id: Option<AccountId>,
    /// Journal entry posted for this movement.
    #[serde(default)]
    pub journal_entry_id: Option<JournalEntryId>,
}

/// Input for recording a custody movement.
#[derive(Debug, Clone)]
pub struct NewCustodyMovement {
    /// Employee holding the custody.
    pub employee_id: EmployeeId,
    /// Direction.
    pub kind: CustodyKind,
    /// Amount moved.
    pub amount: Decimal,
    /// Movement date.
    pub date: NaiveDate,
    /// Optional note.
    pub description: String,
    /// Cash or bank account used instead of the default cash account.
    pub cash_account_id: Option<AccountId>,
}

/// Outstanding custody held by one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustodyBalance {
    /// Employee.
    pub employee_id: EmployeeId,
    /// Employee name.
    pub employee_name: String,
    /// Receipts minus settlements.
    pub balance: Decimal,
}

/// Computes receipts minus settlements for each employee.
///
/// Employees appear in roster order. An employee is listed when the balance
/// is non-zero or when they have any movement at all. Movements for
/// employees missing from the roster are ignored.
#[must_use]
pub fn custody_balances(employees: &[Employee], movements: &[CustodyMovement]) -> Vec<CustodyBalance> {
    employees
        .iter()
        .filter_map(|employee| {
            let own: Vec<&CustodyMovement> = movements
                .iter()
                .filter(|m| m.employee_id == employee.id)
                .collect();
            let balance = own
                .iter()
                .map(|m| match m.kind {
                    CustodyKind::Receipt => m.amount,
                    CustodyKind::Settlement => -m.amount,
                })
                .sum::<Decimal>();

            (!own.is_empty() || !balance.is_zero()).then(|| CustodyBalance {
                employee_id: employee.id,
                employee_name: employee.name.clone(),
                balance,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn employee(name: &str) -> Employee {
        Employee {
            id: EmployeeId::new(),
            name: name.to_string(),
            salary: dec!(3000),
        }
    }

    fn movement(employee: &Employee, kind: CustodyKind, amount: Decimal) -> CustodyMovement {
        CustodyMovement {
            id: CustodyMovementId::new(),
            employee_id: employee.id,
            employee_name: employee.name.clone(),
            kind,
            amount,
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            description: String::new(),
            cash_account_id: None,
            journal_entry_id: None,
        }
    }

    #[test]
    fn test_receipts_minus_settlements() {
        let ali = employee("Ali");
        let movements = vec![
            movement(&ali, CustodyKind::Receipt, dec!(500)),
            movement(&ali, CustodyKind::Settlement, dec!(200)),
        ];
        let balances = custody_balances(&[ali], &movements);
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].balance, dec!(300));
    }

    #[test]
    fn test_settled_employee_still_listed() {
        let ali = employee("Ali");
        let sara = employee("Sara");
        let movements = vec![
            movement(&ali, CustodyKind::Receipt, dec!(100)),
            movement(&ali, CustodyKind::Settlement, dec!(100)),
        ];
        let balances = custody_balances(&[ali, sara], &movements);
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].employee_name, "Ali");
        assert_eq!(balances[0].balance, Decimal::ZERO);
    }
}
