//! Error types for the invoice service
//!
//! - [`StoreError`]: raised by storage backends
//! - [`InvoiceError`]: the HTTP boundary error, rendered as
//!   `{"error": "<message>"}` with a 400, 404 or 500 status
//!
//! Backend failures never leak their details to clients: they are logged and
//! answered with a generic "Failed to ..." message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors returned by an [`InvoiceStore`](crate::core::store::InvoiceStore)
#[derive(Debug, Error)]
pub enum StoreError {
    /// No invoice with this id
    #[error("invoice {0} not found")]
    NotFound(i64),

    /// The backend failed (connection, query, lock poisoning, ...)
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[cfg(feature = "postgres")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(anyhow::Error::new(err))
    }
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Convert into a boundary error for the operation that failed
    pub fn during(self, operation: Operation) -> InvoiceError {
        match self {
            StoreError::NotFound(id) => InvoiceError::NotFound(id),
            StoreError::Backend(source) => InvoiceError::OperationFailed { operation, source },
        }
    }
}

/// The operation an [`InvoiceError::OperationFailed`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Save,
    Fetch,
    Update,
    Delete,
    Render,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phrase = match self {
            Operation::Save => "save invoice",
            Operation::Fetch => "fetch invoices",
            Operation::Update => "update invoice",
            Operation::Delete => "delete invoice",
            Operation::Render => "render invoice preview",
        };
        f.write_str(phrase)
    }
}

/// Boundary error of the HTTP layer
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// `id` query parameter missing or not an integer
    #[error("Invalid invoice ID")]
    InvalidId,

    /// Body could not be parsed or failed validation
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invoice not found")]
    NotFound(i64),

    #[error("Failed to {operation}")]
    OperationFailed {
        operation: Operation,
        #[source]
        source: anyhow::Error,
    },
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl InvoiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InvoiceError::InvalidId | InvoiceError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            InvoiceError::NotFound(_) => StatusCode::NOT_FOUND,
            InvoiceError::OperationFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

impl IntoResponse for InvoiceError {
    fn into_response(self) -> Response {
        match &self {
            InvoiceError::OperationFailed { operation, source } => {
                tracing::error!(error = ?source, "Failed to {}", operation);
            }
            InvoiceError::NotFound(id) => {
                tracing::debug!(invoice_id = *id, "Invoice not found");
            }
            other => {
                tracing::warn!(reason = %other, "Rejected invoice request");
            }
        }

        let status = self.status_code();
        (status, Json(self.to_response())).into_response()
    }
}
