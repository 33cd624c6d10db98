//! Storage trait for invoices

use crate::core::error::StoreResult;
use crate::core::invoice::{Invoice, InvoiceDraft, InvoiceStatus};
use async_trait::async_trait;

/// Persistence for the Invoice aggregate (invoice + owned items)
///
/// Implementations assign ids, stamp `created_at`, and keep item order.
/// Submitted totals are stored exactly as given.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Persist a new pending invoice with its items
    async fn create(&self, draft: InvoiceDraft) -> StoreResult<Invoice>;

    /// Fetch one invoice with its items
    async fn get(&self, id: i64) -> StoreResult<Option<Invoice>>;

    /// All invoices, newest first
    async fn list(&self) -> StoreResult<Vec<Invoice>>;

    /// Replace the scalar fields and the whole item set atomically
    ///
    /// Old items are deleted and the draft's items recreated; status and
    /// `created_at` are kept.
    async fn replace(&self, id: i64, draft: InvoiceDraft) -> StoreResult<Invoice>;

    /// Change only the status
    async fn set_status(&self, id: i64, status: InvoiceStatus) -> StoreResult<Invoice>;

    /// Delete the items, then the invoice
    async fn delete(&self, id: i64) -> StoreResult<()>;
}
