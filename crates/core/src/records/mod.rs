//! Business records that feed the ledger.
//!
//! Each record type is stored in its own collection. Expenses, custody
//! movements and receipt vouchers carry the id of the journal entry that
//! was posted for them.

pub mod asset;
pub mod custody;
pub mod expense;
pub mod sales;

pub use asset::{AssetStatus, FixedAsset, NewFixedAsset};
pub use custody::{CustodyBalance, CustodyKind, CustodyMovement, NewCustodyMovement, custody_balances};
pub use expense::{Expense, NewExpense};
pub use sales::{
    Customer, InvoiceError, InvoiceStatus, NewCustomer, NewReceiptVoucher, NewSalesInvoice, NewSalesInvoiceLine,
    ReceiptVoucher, SalesInvoice, SalesInvoiceLine,
};
