//! Invoice aggregate and its request payloads
//!
//! Field names on the wire are camelCase (`customerName`, `usdToThbRate`, ...).
//! Decimals are written as JSON numbers and accepted either as numbers or as
//! strings, since clients usually submit totals as two-decimal text.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::totals::{ExchangeRates, Reduction, Totals, TotalsError, compute_totals};

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }

    /// Capitalized label used on printed invoices
    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Paid => "Paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(format!("unknown invoice status '{}'", other)),
        }
    }
}

/// A stored line item, amount in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub id: i64,
    pub invoice_id: i64,
    pub description: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
}

/// A stored invoice with its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i64,
    pub customer_name: String,
    #[serde(deserialize_with = "date_format::deserialize")]
    pub date: NaiveDate,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub usd_to_thb_rate: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub thb_to_mmk_rate: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_usd: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_thb: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_mmk: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub final_mmk: Decimal,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<InvoiceItem>,
}

impl Invoice {
    /// Build a new pending invoice from a draft
    ///
    /// Item ids are assigned by `next_item_id`, called once per item in order.
    pub fn from_draft(
        id: i64,
        draft: &InvoiceDraft,
        created_at: DateTime<Utc>,
        next_item_id: impl FnMut() -> i64,
    ) -> Self {
        let mut invoice = Self {
            id,
            customer_name: String::new(),
            date: draft.date,
            usd_to_thb_rate: Decimal::ZERO,
            thb_to_mmk_rate: Decimal::ZERO,
            total_usd: Decimal::ZERO,
            total_thb: Decimal::ZERO,
            total_mmk: Decimal::ZERO,
            final_mmk: Decimal::ZERO,
            status: InvoiceStatus::Pending,
            created_at,
            items: Vec::new(),
        };
        invoice.apply_draft(draft, next_item_id);
        invoice
    }

    /// Overwrite every scalar field and the whole item set from a draft
    ///
    /// The status and creation timestamp are left untouched. Submitted totals
    /// are stored as given.
    pub fn apply_draft(&mut self, draft: &InvoiceDraft, mut next_item_id: impl FnMut() -> i64) {
        self.customer_name = draft.customer_name.clone();
        self.date = draft.date;
        self.usd_to_thb_rate = draft.usd_to_thb_rate;
        self.thb_to_mmk_rate = draft.thb_to_mmk_rate;
        self.total_usd = draft.totals.usd;
        self.total_thb = draft.totals.thb;
        self.total_mmk = draft.totals.mmk;
        self.final_mmk = draft.totals.final_mmk;

        let invoice_id = self.id;
        self.items = draft
            .items
            .iter()
            .map(|item| InvoiceItem {
                id: next_item_id(),
                invoice_id,
                description: item.description.clone(),
                amount: item.amount,
            })
            .collect();
    }
}

/// Totals as submitted by a client (`usd`, `thb`, `mmk`, `final`, `finalThb`)
///
/// Serialized as two-decimal strings, which is the shape clients compute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedTotals {
    pub usd: Decimal,
    pub thb: Decimal,
    pub mmk: Decimal,
    #[serde(rename = "final")]
    pub final_mmk: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_thb: Option<Decimal>,
}

/// A line item as submitted by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
}

/// Body of `POST /invoices` and `PUT /invoices?id=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub customer_name: String,
    #[serde(deserialize_with = "date_format::deserialize")]
    pub date: NaiveDate,
    pub usd_to_thb_rate: Decimal,
    pub thb_to_mmk_rate: Decimal,
    pub totals: SubmittedTotals,
    pub items: Vec<ItemDraft>,
}

impl InvoiceDraft {
    pub fn rates(&self) -> Result<ExchangeRates, TotalsError> {
        ExchangeRates::new(self.usd_to_thb_rate, self.thb_to_mmk_rate)
    }

    /// Totals the server would compute for this draft
    pub fn recompute_totals(&self, reduction: Reduction) -> Result<Totals, TotalsError> {
        let rates = self.rates()?;
        compute_totals(self.items.iter().map(|item| item.amount), &rates, reduction)
    }
}

/// Body of `PATCH /invoices?id=`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPatch {
    pub status: InvoiceStatus,
}

/// Body of `POST /invoices/totals`
///
/// Missing rates fall back to the configured defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsRequest {
    pub items: Vec<ItemDraft>,
    #[serde(default)]
    pub usd_to_thb_rate: Option<Decimal>,
    #[serde(default)]
    pub thb_to_mmk_rate: Option<Decimal>,
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (its UTC date is kept)
pub(crate) mod date_format {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, de::Error};

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|ts| ts.with_timezone(&Utc).date_naive())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date '{}'", raw)))
    }
}
