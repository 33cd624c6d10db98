//! Route table of the invoice service

use super::handlers::{
    calculate_totals, create_invoice, delete_invoice, get_invoices, patch_invoice_status,
    preview_invoice, update_invoice,
};
use super::state::AppState;
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the invoice routes
///
/// - GET    /invoices            - List all invoices, newest first
/// - GET    /invoices?id={id}    - Get one invoice
/// - POST   /invoices            - Create an invoice
/// - PUT    /invoices?id={id}    - Replace an invoice and its items
/// - PATCH  /invoices?id={id}    - Change the status
/// - DELETE /invoices?id={id}    - Delete an invoice and its items
/// - POST   /invoices/totals     - Compute totals without storing
/// - GET    /invoices/preview?id={id} - Printable HTML view
pub fn build_invoice_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/invoices",
            get(get_invoices)
                .post(create_invoice)
                .put(update_invoice)
                .patch(patch_invoice_status)
                .delete(delete_invoice),
        )
        .route("/invoices/totals", post(calculate_totals))
        .route("/invoices/preview", get(preview_invoice))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "invoice-rs"
    }))
}

/// Full application router with tracing and CORS layers
pub fn build_router(state: AppState) -> Router {
    health_routes()
        .merge(build_invoice_routes(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
