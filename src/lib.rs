//! # invoice-rs
//!
//! Invoice generation and management service. Line items are priced in USD,
//! converted to Thai baht and then to Myanmar kyat, and a configurable
//! percentage reduction gives the final amount.
//!
//! ## Features
//!
//! - **Invoice CRUD**: create, list, fetch, replace, re-status and delete
//!   invoices through `/invoices` with an `?id=` query parameter
//! - **Exact money**: totals use `rust_decimal`, rounded to two places once
//! - **Pluggable storage**: in-memory store, or PostgreSQL behind the
//!   `postgres` feature
//! - **Print preview**: HTML rendering of a stored invoice
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoice::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_store(InMemoryInvoiceStore::new())
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ExchangeRates, Invoice, InvoiceDraft, InvoiceError, InvoiceItem, InvoiceStatus,
        InvoiceStore, ItemDraft, Reduction, StatusPatch, StoreError, StoreResult,
        SubmittedTotals, Totals, TotalsRequest, compute_totals,
    };

    // === Storage ===
    pub use crate::storage::InMemoryInvoiceStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Config ===
    pub use crate::config::{AppConfig, LogFormat, PricingConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use rust_decimal::Decimal;
}
