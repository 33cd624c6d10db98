//! In-memory implementation of InvoiceStore for testing and development

use crate::core::error::{StoreError, StoreResult};
use crate::core::invoice::{Invoice, InvoiceDraft, InvoiceItem, InvoiceStatus};
use crate::core::store::InvoiceStore;
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Invoices and items kept in separate tables, like the relational schema
#[derive(Debug, Default)]
struct Tables {
    last_invoice_id: i64,
    last_item_id: i64,
    /// Invoice rows; their `items` vector is always empty
    invoices: BTreeMap<i64, Invoice>,
    /// Item rows keyed by item id (ascending id = insertion order)
    items: BTreeMap<i64, InvoiceItem>,
}

impl Tables {
    fn next_invoice_id(&mut self) -> i64 {
        self.last_invoice_id += 1;
        self.last_invoice_id
    }

    fn insert_items(&mut self, items: Vec<InvoiceItem>) {
        for item in items {
            self.items.insert(item.id, item);
        }
    }

    fn delete_items(&mut self, invoice_id: i64) {
        self.items.retain(|_, item| item.invoice_id != invoice_id);
    }

    /// Join an invoice row with its items, in insertion order
    fn assemble(&self, row: &Invoice) -> Invoice {
        let mut invoice = row.clone();
        invoice.items = self
            .items
            .values()
            .filter(|item| item.invoice_id == row.id)
            .cloned()
            .collect();
        invoice
    }

    fn next_item_id(&mut self) -> impl FnMut() -> i64 + '_ {
        move || {
            self.last_item_id += 1;
            self.last_item_id
        }
    }

    /// Split an assembled invoice into its invoice row and item rows
    fn store(&mut self, mut invoice: Invoice) -> Invoice {
        let id = invoice.id;
        let items = std::mem::take(&mut invoice.items);
        self.invoices.insert(id, invoice);
        self.insert_items(items);
        self.assemble(&self.invoices[&id])
    }
}

/// In-memory invoice store
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// every operation runs inside a single lock section, so multi-step writes
/// are atomic.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryInvoiceStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for InMemoryInvoiceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryInvoiceStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn create(&self, draft: InvoiceDraft) -> StoreResult<Invoice> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = tables.next_invoice_id();
        let invoice = Invoice::from_draft(id, &draft, Utc::now(), tables.next_item_id());
        Ok(tables.store(invoice))
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Invoice>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(tables.invoices.get(&id).map(|row| tables.assemble(row)))
    }

    async fn list(&self) -> StoreResult<Vec<Invoice>> {
        let tables = self
            .tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut invoices: Vec<Invoice> = tables
            .invoices
            .values()
            .map(|row| tables.assemble(row))
            .collect();
        invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(invoices)
    }

    async fn replace(&self, id: i64, draft: InvoiceDraft) -> StoreResult<Invoice> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let mut invoice = tables
            .invoices
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;

        tables.delete_items(id);
        invoice.apply_draft(&draft, tables.next_item_id());

        Ok(tables.store(invoice))
    }

    async fn set_status(&self, id: i64, status: InvoiceStatus) -> StoreResult<Invoice> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let row = tables
            .invoices
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        row.status = status;
        let row = row.clone();

        Ok(tables.assemble(&row))
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !tables.invoices.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }

        tables.delete_items(id);
        tables.invoices.remove(&id);

        Ok(())
    }
}
