//! Axum extractors for the `?id=` query parameter
//!
//! Every targeted operation addresses its invoice through the query string
//! (`/invoices?id=42`). A missing or non-integer id is rejected with
//! [`InvoiceError::InvalidId`].

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use crate::core::error::InvoiceError;

#[derive(Debug, Default, Deserialize)]
struct IdQuery {
    id: Option<String>,
}

/// Parse a raw `id` value; blank counts as absent
fn parse_id(raw: Option<&str>) -> Result<Option<i64>, InvoiceError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| InvoiceError::InvalidId),
    }
}

fn id_from_parts(parts: &Parts) -> Result<Option<i64>, InvoiceError> {
    let Query(query) =
        Query::<IdQuery>::try_from_uri(&parts.uri).map_err(|_| InvoiceError::InvalidId)?;
    parse_id(query.id.as_deref())
}

/// Required invoice id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceId(pub i64);

impl<S> FromRequestParts<S> for InvoiceId
where
    S: Send + Sync,
{
    type Rejection = InvoiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        id_from_parts(parts)?
            .map(InvoiceId)
            .ok_or(InvoiceError::InvalidId)
    }
}

/// Optional invoice id: `GET /invoices` lists, `GET /invoices?id=N` fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeInvoiceId(pub Option<i64>);

impl<S> FromRequestParts<S> for MaybeInvoiceId
where
    S: Send + Sync,
{
    type Rejection = InvoiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        id_from_parts(parts).map(MaybeInvoiceId)
    }
}
