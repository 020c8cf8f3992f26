//! Customers, sales invoices and receipt vouchers.

use chrono::NaiveDate;
use mizan_shared::AppError;
use mizan_shared::types::{AccountId, CustomerId, JournalEntryId, ReceiptVoucherId, SalesInvoiceId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ledger::within_limit;

/// A customer, stored in the `customers` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Store-assigned identifier.
    pub id: CustomerId,
    /// Name.
    pub name: String,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// Input for creating a customer.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    /// Name.
    pub name: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

/// Sales invoice status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Being prepared.
    #[default]
    Draft,
    /// Sent to the customer.
    Issued,
    /// Settled.
    Paid,
}

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesInvoiceLine {
    /// Item description.
    pub description: String,
    /// Quantity sold.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
    /// quantity × unit price.
    pub total: Decimal,
}

/// A sales invoice, stored in the `salesInvoices` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesInvoice {
    /// Store-assigned identifier.
    pub id: SalesInvoiceId,
    /// Billed customer.
    pub customer_id: CustomerId,
    /// Customer name at invoicing time.
    pub customer_name: String,
    /// Invoice date.
    pub date: NaiveDate,
    /// Lines.
    pub items: Vec<SalesInvoiceLine>,
    /// Sum of line totals.
    pub total_amount: Decimal,
    /// Status.
    #[serde(default)]
    pub status: InvoiceStatus,
}

/// Input for one invoice line.
#[derive(Debug, Clone)]
pub struct NewSalesInvoiceLine {
    /// Item description.
    pub description: String,
    /// Quantity sold.
    pub quantity: Decimal,
    /// Price per unit.
    pub unit_price: Decimal,
}

/// Input for creating a sales invoice.
#[derive(Debug, Clone)]
pub struct NewSalesInvoice {
    /// Billed customer.
    pub customer_id: CustomerId,
    /// Invoice date.
    pub date: NaiveDate,
    /// Lines.
    pub items: Vec<NewSalesInvoiceLine>,
}

/// Errors raised while building a sales invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// No lines were given.
    #[error("Invoice must have at least one line")]
    NoLines,

    /// A line has a negative quantity or price.
    #[error("Invoice line {0} has a negative quantity or price")]
    NegativeLine(usize),

    /// A line total, or the invoice total, exceeds the amount ceiling.
    #[error("Invoice amount exceeds the allowed maximum")]
    AmountTooLarge,
}

impl From<InvoiceError> for AppError {
    fn from(err: InvoiceError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl SalesInvoice {
    /// Builds a draft invoice, computing every line total and the invoice total.
    ///
    /// # Errors
    ///
    /// Returns `NoLines` for an empty invoice, `NegativeLine` for a line
    /// with a negative quantity or unit price, and `AmountTooLarge` when a
    /// total passes the ledger's amount ceiling.
    pub fn draft(
        id: SalesInvoiceId,
        customer: &Customer,
        input: NewSalesInvoice,
    ) -> Result<Self, InvoiceError> {
        if input.items.is_empty() {
            return Err(InvoiceError::NoLines);
        }

        let items = input
            .items
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                if line.quantity < Decimal::ZERO || line.unit_price < Decimal::ZERO {
                    return Err(InvoiceError::NegativeLine(i));
                }
                let total = line
                    .quantity
                    .checked_mul(line.unit_price)
                    .filter(|t| within_limit(*t))
                    .ok_or(InvoiceError::AmountTooLarge)?;
                Ok(SalesInvoiceLine {
                    total,
                    description: line.description,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total_amount = items
            .iter()
            .try_fold(Decimal::ZERO, |sum, l| sum.checked_add(l.total))
            .filter(|t| within_limit(*t))
            .ok_or(InvoiceError::AmountTooLarge)?;

        Ok(Self {
            id,
            customer_id: customer.id,
            customer_name: customer.name.clone(),
            date: input.date,
            total_amount,
            items,
            status: InvoiceStatus::Draft,
        })
    }
}

/// A customer receipt, stored in the `receiptVouchers` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptVoucher {
    /// Store-assigned identifier.
    pub id: ReceiptVoucherId,
    /// Paying customer.
    pub customer_id: CustomerId,
    /// Customer name at receipt time.
    pub customer_name: String,
    /// Amount received.
    pub amount: Decimal,
    /// Receipt date.
    pub date: NaiveDate,
    /// Optional note.
    #[serde(default)]
    pub description: String,
    /// Cash or bank account debited.
    pub cash_account_id: AccountId,
    /// Journal entry posted for this receipt.
    #[serde(default)]
    pub journal_entry_id: Option<JournalEntryId>,
}

/// Input for recording a receipt voucher.
#[derive(Debug, Clone)]
pub struct NewReceiptVoucher {
    /// Paying customer.
    pub customer_id: CustomerId,
    /// Amount received.
    pub amount: Decimal,
    /// Receipt date.
    pub date: NaiveDate,
    /// Optional note.
    pub description: String,
    /// Cash or bank account debited.
    pub cash_account_id: AccountId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn customer() -> Customer {
        Customer {
            id: CustomerId::new(),
            name: "Nour Trading".to_string(),
            phone: None,
            email: None,
        }
    }

    fn line(quantity: Decimal, unit_price: Decimal) -> NewSalesInvoiceLine {
        NewSalesInvoiceLine {
            description: "Item".to_string(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_invoice_totals() {
        let invoice = SalesInvoice::draft(
            SalesInvoiceId::new(),
            &customer(),
            NewSalesInvoice {
                customer_id: CustomerId::new(),
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                items: vec![line(dec!(3), dec!(12.50)), line(dec!(1), dec!(100))],
            },
        )
        .unwrap();
        assert_eq!(invoice.items[0].total, dec!(37.50));
        assert_eq!(invoice.total_amount, dec!(137.50));
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.customer_name, "Nour Trading");
    }

    #[test]
    fn test_empty_invoice_rejected() {
        let result = SalesInvoice::draft(
            SalesInvoiceId::new(),
            &customer(),
            NewSalesInvoice {
                customer_id: CustomerId::new(),
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                items: vec![],
            },
        );
        assert!(matches!(result, Err(InvoiceError::NoLines)));
    }

    #[test]
    fn test_negative_line_rejected() {
        let result = SalesInvoice::draft(
            SalesInvoiceId::new(),
            &customer(),
            NewSalesInvoice {
                customer_id: CustomerId::new(),
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                items: vec![line(dec!(1), dec!(5)), line(dec!(-2), dec!(5))],
            },
        );
        assert!(matches!(result, Err(InvoiceError::NegativeLine(1))));
    }

    #[test]
    fn test_oversized_line_rejected() {
        let result = SalesInvoice::draft(
            SalesInvoiceId::new(),
            &customer(),
            NewSalesInvoice {
                customer_id: CustomerId::new(),
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                items: vec![line(Decimal::MAX, dec!(2))],
            },
        );
        assert!(matches!(result, Err(InvoiceError::AmountTooLarge)));
    }
}
