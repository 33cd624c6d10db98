//! Printable HTML preview of a stored invoice

use crate::core::invoice::Invoice;
use crate::core::totals::format_amount;
use serde::Serialize;
use tera::{Context, Tera};

pub const PREVIEW_TEMPLATE: &str = "invoice_preview.html";

pub const USD_SYMBOL: &str = "$";
pub const THB_SYMBOL: &str = "\u{0E3F}";
pub const MMK_SYMBOL: &str = "K";

/// Template set with the preview registered (HTML autoescaping on)
pub fn templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template(
        PREVIEW_TEMPLATE,
        include_str!("../../templates/invoice_preview.html"),
    )?;
    Ok(tera)
}

#[derive(Debug, Serialize)]
struct PreviewItem {
    description: String,
    amount: String,
}

/// Everything the template prints, already formatted
#[derive(Debug, Serialize)]
struct PreviewContext {
    id: i64,
    status: &'static str,
    status_label: &'static str,
    customer_name: String,
    date: String,
    usd_to_thb_rate: String,
    thb_to_mmk_rate: String,
    items: Vec<PreviewItem>,
    total_usd: String,
    total_thb: String,
    total_mmk: String,
    final_mmk: String,
    usd_symbol: &'static str,
    thb_symbol: &'static str,
    mmk_symbol: &'static str,
}

impl From<&Invoice> for PreviewContext {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            status: invoice.status.as_str(),
            status_label: invoice.status.label(),
            customer_name: invoice.customer_name.clone(),
            date: invoice.date.format("%Y-%m-%d").to_string(),
            usd_to_thb_rate: format_amount(invoice.usd_to_thb_rate),
            thb_to_mmk_rate: format_amount(invoice.thb_to_mmk_rate),
            items: invoice
                .items
                .iter()
                .map(|item| PreviewItem {
                    description: item.description.clone(),
                    amount: format_amount(item.amount),
                })
                .collect(),
            total_usd: format_amount(invoice.total_usd),
            total_thb: format_amount(invoice.total_thb),
            total_mmk: format_amount(invoice.total_mmk),
            final_mmk: format_amount(invoice.final_mmk),
            usd_symbol: USD_SYMBOL,
            thb_symbol: THB_SYMBOL,
            mmk_symbol: MMK_SYMBOL,
        }
    }
}

pub fn render_preview(tera: &Tera, invoice: &Invoice) -> Result<String, tera::Error> {
    let context = Context::from_serialize(PreviewContext::from(invoice))?;
    tera.render(PREVIEW_TEMPLATE, &context)
}
