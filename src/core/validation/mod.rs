//! Request validation
//!
//! Payloads implement [`Validate`]; the [`ValidatedJson`] extractor parses,
//! normalizes and validates them before they reach a handler.

pub mod extractor;
pub mod validators;

pub use extractor::ValidatedJson;

use crate::core::invoice::{InvoiceDraft, StatusPatch, TotalsRequest};
use validators::{non_empty, non_negative, positive, required_text};

/// A request payload that can be checked before use
pub trait Validate {
    /// Clean up the payload in place (trimming and similar)
    fn normalize(&mut self) {}

    /// Return every problem found, or `Ok(())`
    fn validate(&self) -> Result<(), Vec<String>>;
}

fn collect<I>(results: I) -> Result<(), Vec<String>>
where
    I: IntoIterator<Item = Result<(), String>>,
{
    let errors: Vec<String> = results.into_iter().filter_map(Result::err).collect();
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

impl Validate for InvoiceDraft {
    fn normalize(&mut self) {
        self.customer_name = self.customer_name.trim().to_string();
        for item in &mut self.items {
            item.description = item.description.trim().to_string();
        }
    }

    fn validate(&self) -> Result<(), Vec<String>> {
        let mut results = vec![
            required_text("customerName", &self.customer_name),
            positive("usdToThbRate", self.usd_to_thb_rate),
            positive("thbToMmkRate", self.thb_to_mmk_rate),
            non_empty("items", &self.items),
        ];
        results.extend(
            self.items
                .iter()
                .enumerate()
                .map(|(i, item)| non_negative(&format!("items[{}].amount", i), item.amount)),
        );
        collect(results)
    }
}

impl Validate for StatusPatch {
    fn validate(&self) -> Result<(), Vec<String>> {
        // The status enum is already checked by deserialization
        Ok(())
    }
}

impl Validate for TotalsRequest {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut results = Vec::new();
        if let Some(rate) = self.usd_to_thb_rate {
            results.push(positive("usdToThbRate", rate));
        }
        if let Some(rate) = self.thb_to_mmk_rate {
            results.push(positive("thbToMmkRate", rate));
        }
        results.extend(
            self.items
                .iter()
                .enumerate()
                .map(|(i, item)| non_negative(&format!("items[{}].amount", i), item.amount)),
        );
        collect(results)
    }
}
