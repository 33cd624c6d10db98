//! Core module containing the invoice domain, totals arithmetic and storage trait

pub mod error;
pub mod extractors;
pub mod invoice;
pub mod store;
pub mod totals;
pub mod validation;

pub use error::{InvoiceError, Operation, StoreError, StoreResult};
pub use extractors::{InvoiceId, MaybeInvoiceId};
pub use invoice::{
    Invoice, InvoiceDraft, InvoiceItem, InvoiceStatus, ItemDraft, StatusPatch, SubmittedTotals,
    TotalsRequest,
};
pub use store::InvoiceStore;
pub use totals::{ExchangeRates, Reduction, Totals, compute_totals};
