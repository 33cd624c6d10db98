//! Invoice HTTP handlers

use super::preview::render_preview;
use super::state::AppState;
use crate::core::error::{InvoiceError, Operation};
use crate::core::extractors::{InvoiceId, MaybeInvoiceId};
use crate::core::invoice::{Invoice, InvoiceDraft, StatusPatch, TotalsRequest};
use crate::core::totals::{ExchangeRates, compute_totals, format_amount, verify_submitted_totals};
use crate::core::validation::ValidatedJson;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Json, Response},
};
use rust_decimal::Decimal;
use serde::Serialize;

/// Body of `PUT` and `DELETE` responses
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// Body of `POST /invoices/totals`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResponse {
    pub usd: String,
    pub thb: String,
    pub mmk: String,
    #[serde(rename = "final")]
    pub final_mmk: String,
    pub final_thb: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub reduction_percent: Decimal,
}

/// Log (never reject) totals that disagree with the items
///
/// Totals that cannot be recomputed at all are logged too; the draft is
/// still saved as submitted.
fn check_submitted_totals(state: &AppState, draft: &InvoiceDraft) {
    match draft.recompute_totals(state.reduction) {
        Ok(expected) => {
            let mismatches = verify_submitted_totals(&draft.totals, &expected);
            if !mismatches.is_empty() {
                tracing::warn!(
                    customer = %draft.customer_name,
                    fields = ?mismatches,
                    "Submitted totals differ from recomputed totals"
                );
            }
        }
        Err(err) => tracing::warn!(error = %err, "Could not recompute submitted totals"),
    }
}

/// `GET /invoices` lists, `GET /invoices?id=N` fetches one
pub async fn get_invoices(
    State(state): State<AppState>,
    MaybeInvoiceId(id): MaybeInvoiceId,
) -> Result<Response, InvoiceError> {
    match id {
        Some(id) => {
            let invoice = state
                .store
                .get(id)
                .await
                .map_err(|e| e.during(Operation::Fetch))?
                .ok_or(InvoiceError::NotFound(id))?;
            Ok(Json(invoice).into_response())
        }
        None => {
            let invoices = state
                .store
                .list()
                .await
                .map_err(|e| e.during(Operation::Fetch))?;
            Ok(Json(invoices).into_response())
        }
    }
}

pub async fn create_invoice(
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<InvoiceDraft>,
) -> Result<Json<Invoice>, InvoiceError> {
    check_submitted_totals(&state, &draft);

    let invoice = state
        .store
        .create(draft)
        .await
        .map_err(|e| e.during(Operation::Save))?;

    tracing::info!(
        invoice_id = invoice.id,
        items = invoice.items.len(),
        "Invoice created"
    );
    Ok(Json(invoice))
}

pub async fn update_invoice(
    State(state): State<AppState>,
    InvoiceId(id): InvoiceId,
    ValidatedJson(draft): ValidatedJson<InvoiceDraft>,
) -> Result<Json<SuccessResponse>, InvoiceError> {
    check_submitted_totals(&state, &draft);

    let invoice = state
        .store
        .replace(id, draft)
        .await
        .map_err(|e| e.during(Operation::Update))?;

    tracing::info!(
        invoice_id = id,
        items = invoice.items.len(),
        "Invoice replaced"
    );
    Ok(SuccessResponse::ok())
}

pub async fn patch_invoice_status(
    State(state): State<AppState>,
    InvoiceId(id): InvoiceId,
    ValidatedJson(patch): ValidatedJson<StatusPatch>,
) -> Result<Json<Invoice>, InvoiceError> {
    let invoice = state
        .store
        .set_status(id, patch.status)
        .await
        .map_err(|e| e.during(Operation::Update))?;

    tracing::info!(invoice_id = id, status = %invoice.status, "Invoice status changed");
    Ok(Json(invoice))
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    InvoiceId(id): InvoiceId,
) -> Result<Json<SuccessResponse>, InvoiceError> {
    state
        .store
        .delete(id)
        .await
        .map_err(|e| e.during(Operation::Delete))?;

    tracing::info!(invoice_id = id, "Invoice deleted");
    Ok(SuccessResponse::ok())
}

/// Compute totals without storing anything
pub async fn calculate_totals(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TotalsRequest>,
) -> Result<Json<TotalsResponse>, InvoiceError> {
    let rates = ExchangeRates::new(
        request
            .usd_to_thb_rate
            .unwrap_or(state.default_rates.usd_to_thb),
        request
            .thb_to_mmk_rate
            .unwrap_or(state.default_rates.thb_to_mmk),
    )
    .map_err(|e| InvoiceError::InvalidBody(e.to_string()))?;

    let totals = compute_totals(
        request.items.iter().map(|item| item.amount),
        &rates,
        state.reduction,
    )
    .map_err(|e| InvoiceError::InvalidBody(e.to_string()))?;

    Ok(Json(TotalsResponse {
        usd: format_amount(totals.usd),
        thb: format_amount(totals.thb),
        mmk: format_amount(totals.mmk),
        final_mmk: format_amount(totals.final_mmk),
        final_thb: format_amount(totals.final_thb),
        reduction_percent: state.reduction.percent(),
    }))
}

/// `GET /invoices/preview?id=N`
pub async fn preview_invoice(
    State(state): State<AppState>,
    InvoiceId(id): InvoiceId,
) -> Result<Html<String>, InvoiceError> {
    let invoice = state
        .store
        .get(id)
        .await
        .map_err(|e| e.during(Operation::Fetch))?
        .ok_or(InvoiceError::NotFound(id))?;

    let html = render_preview(&state.templates, &invoice).map_err(|e| {
        InvoiceError::OperationFailed {
            operation: Operation::Render,
            source: e.into(),
        }
    })?;
    Ok(Html(html))
}
