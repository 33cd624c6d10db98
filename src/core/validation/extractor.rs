//! Axum extractor for validated JSON payloads
//!
//! `ValidatedJson<T>` parses the body as `T`, normalizes it and runs
//! [`Validate::validate`]. Any failure (malformed JSON, wrong content type,
//! missing field, invalid value) is rejected as a 400 `InvalidBody`.

use super::Validate;
use crate::core::error::InvoiceError;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// Axum extractor that deserializes and validates a JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_invoice(
///     ValidatedJson(draft): ValidatedJson<InvoiceDraft>,
/// ) -> Result<Json<Invoice>, InvoiceError> {
///     // draft is already trimmed and validated
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = InvoiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| InvoiceError::InvalidBody(rejection.body_text()))?;

        payload.normalize();
        payload
            .validate()
            .map_err(|errors| InvoiceError::InvalidBody(errors.join("; ")))?;

        Ok(ValidatedJson(payload))
    }
}
