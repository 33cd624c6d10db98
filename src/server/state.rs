//! Shared state handed to every handler

use crate::config::PricingConfig;
use crate::core::store::InvoiceStore;
use crate::core::totals::{ExchangeRates, Reduction, TotalsError};
use std::sync::Arc;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn InvoiceStore>,
    /// Applied to every computed final amount
    pub reduction: Reduction,
    /// Used by `/invoices/totals` when the request omits a rate
    pub default_rates: ExchangeRates,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn InvoiceStore>,
        pricing: &PricingConfig,
        templates: Tera,
    ) -> Result<Self, TotalsError> {
        Ok(Self {
            store,
            reduction: pricing.reduction()?,
            default_rates: pricing.default_rates()?,
            templates: Arc::new(templates),
        })
    }
}
