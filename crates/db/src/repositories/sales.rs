//! Sales repository: customers, invoices and receipt vouchers.

use mizan_core::chart::Account;
use mizan_core::ledger::JournalEntry;
use mizan_core::posting::{PostingError, PostingService};
use mizan_core::records::{
    Customer, InvoiceError, InvoiceStatus, NewCustomer, NewReceiptVoucher, NewSalesInvoice,
    ReceiptVoucher, SalesInvoice,
};
use mizan_shared::types::{CustomerId, JournalEntryId, ReceiptVoucherId, SalesInvoiceId};
use mizan_shared::{AppError, ReceiptCreditTarget, TenantContext};
use serde_json::{Map, Value};
use tracing::info;

use super::journal::stage_entry;
use super::load_all;
use crate::store::{
    Collection, Document, SharedStore, StoreError, WriteBatch, decode_all, to_fields,
};

/// Error types for sales operations.
#[derive(Debug, thiserror::Error)]
pub enum SalesError {
    /// Customer name is blank.
    #[error("Customer name is required")]
    EmptyCustomerName,

    /// Customer not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// Invoice not found.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(SalesInvoiceId),

    /// Invoice lines failed validation.
    #[error(transparent)]
    Invoice(#[from] InvoiceError),

    /// The receipt entry could not be built.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<SalesError> for AppError {
    fn from(err: SalesError) -> Self {
        match err {
            SalesError::EmptyCustomerName => Self::Validation(err.to_string()),
            SalesError::CustomerNotFound(_) | SalesError::InvoiceNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            SalesError::Invoice(e) => e.into(),
            SalesError::Posting(e) => e.into(),
            SalesError::Store(e) => e.into(),
        }
    }
}

/// Sales repository.
#[derive(Clone)]
pub struct SalesRepository {
    store: SharedStore,
    credit_target: ReceiptCreditTarget,
}

impl SalesRepository {
    /// Creates a new sales repository.
    ///
    /// `credit_target` picks the account receipt vouchers credit.
    #[must_use]
    pub const fn new(store: SharedStore, credit_target: ReceiptCreditTarget) -> Self {
        Self {
            store,
            credit_target,
        }
    }

    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCustomerName` for a blank name.
    pub async fn create_customer(
        &self,
        ctx: &TenantContext,
        input: NewCustomer,
    ) -> Result<Customer, SalesError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(SalesError::EmptyCustomerName);
        }
        let customer = Customer {
            id: CustomerId::new(),
            name: name.to_string(),
            phone: input.phone,
            email: input.email,
        };
        self.store
            .set(ctx, Collection::Customers, &customer.id.to_string(), to_fields(&customer)?)
            .await?;

        info!(tenant_id = %ctx.tenant_id, customer_id = %customer.id, "Customer created");
        Ok(customer)
    }

    /// Lists customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_customers(&self, ctx: &TenantContext) -> Result<Vec<Customer>, SalesError> {
        Ok(load_all(&self.store, ctx, Collection::Customers).await?)
    }

    /// Creates a draft invoice with computed line and invoice totals.
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound`, or an invoice error for empty or negative lines.
    pub async fn create_invoice(
        &self,
        ctx: &TenantContext,
        input: NewSalesInvoice,
    ) -> Result<SalesInvoice, SalesError> {
        let customer = self.find_customer(ctx, input.customer_id).await?;
        let invoice = SalesInvoice::draft(SalesInvoiceId::new(), &customer, input)?;
        self.store
            .set(
                ctx,
                Collection::SalesInvoices,
                &invoice.id.to_string(),
                to_fields(&invoice)?,
            )
            .await?;

        info!(
            tenant_id = %ctx.tenant_id,
            invoice_id = %invoice.id,
            total = %invoice.total_amount,
            "Sales invoice created"
        );
        Ok(invoice)
    }

    /// Moves an invoice to a new status.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceNotFound` if no such invoice exists.
    pub async fn set_invoice_status(
        &self,
        ctx: &TenantContext,
        id: SalesInvoiceId,
        status: InvoiceStatus,
    ) -> Result<(), SalesError> {
        let mut fields = Map::new();
        fields.insert("status".to_string(), serde_json::to_value(status).map_err(StoreError::from)?);
        match self
            .store
            .update(ctx, Collection::SalesInvoices, &id.to_string(), fields)
            .await
        {
            Err(StoreError::NotFound { .. }) => Err(SalesError::InvoiceNotFound(id)),
            other => other.map_err(SalesError::from),
        }
    }

    /// Lists invoices, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_invoices(&self, ctx: &TenantContext) -> Result<Vec<SalesInvoice>, SalesError> {
        let mut invoices: Vec<SalesInvoice> =
            load_all(&self.store, ctx, Collection::SalesInvoices).await?;
        invoices.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(invoices)
    }

    /// Lists a customer's invoices.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn invoices_for(
        &self,
        ctx: &TenantContext,
        customer_id: CustomerId,
    ) -> Result<Vec<SalesInvoice>, SalesError> {
        let docs = self
            .store
            .query_eq(
                ctx,
                Collection::SalesInvoices,
                "customerId",
                &Value::String(customer_id.to_string()),
            )
            .await?;
        Ok(decode_all(&docs)?)
    }

    /// Records a receipt voucher and posts its entry in one batch.
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound`, or a posting error if an account cannot be
    /// resolved or the amount is not positive.
    pub async fn record_receipt(
        &self,
        ctx: &TenantContext,
        input: NewReceiptVoucher,
    ) -> Result<(ReceiptVoucher, JournalEntry), SalesError> {
        let customer = self.find_customer(ctx, input.customer_id).await?;
        let accounts: Vec<Account> = load_all(&self.store, ctx, Collection::Accounts).await?;

        let mut voucher = ReceiptVoucher {
            id: ReceiptVoucherId::new(),
            customer_id: customer.id,
            customer_name: customer.name,
            amount: input.amount,
            date: input.date,
            description: input.description,
            cash_account_id: input.cash_account_id,
            journal_entry_id: None,
        };
        let entry = JournalEntry::from_new(
            JournalEntryId::new(),
            PostingService::receipt_entry(&accounts, &voucher, self.credit_target)?,
            true,
        );
        voucher.journal_entry_id = Some(entry.id);

        let mut batch = WriteBatch::new();
        batch.create(
            Collection::ReceiptVouchers,
            voucher.id.to_string(),
            to_fields(&voucher)?,
        );
        stage_entry(&mut batch, &entry)?;
        self.store.commit(ctx, batch).await?;

        info!(
            tenant_id = %ctx.tenant_id,
            voucher_id = %voucher.id,
            entry_id = %entry.id,
            amount = %voucher.amount,
            "Receipt voucher recorded"
        );
        Ok((voucher, entry))
    }

    /// Lists receipt vouchers, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn list_receipts(
        &self,
        ctx: &TenantContext,
    ) -> Result<Vec<ReceiptVoucher>, SalesError> {
        let mut vouchers: Vec<ReceiptVoucher> =
            load_all(&self.store, ctx, Collection::ReceiptVouchers).await?;
        vouchers.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(vouchers)
    }

    async fn find_customer(
        &self,
        ctx: &TenantContext,
        id: CustomerId,
    ) -> Result<Customer, SalesError> {
        self.store
            .get(ctx, Collection::Customers, &id.to_string())
            .await?
            .as_ref()
            .map(Document::decode::<Customer>)
            .transpose()?
            .ok_or(SalesError::CustomerNotFound(id))
    }
}
