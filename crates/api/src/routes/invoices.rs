//! Invoice issue, lookup, listing and cancellation endpoints.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::AccessKey;
use domain::{Invoice, InvoiceService};
use invoice_store::InvoiceRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<R: InvoiceRepository> {
    pub invoice_service: InvoiceService<R>,
}

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct IssueInvoiceRequest {
    pub issuer_tax_id: String,
    pub recipient_tax_id: String,
    pub total_value: f64,
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub key: String,
    pub issuer_tax_id: String,
    pub recipient_tax_id: String,
    pub total_value: f64,
    pub status: String,
    pub created_at: String,
}

impl From<&Invoice> for InvoiceResponse {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id().to_string(),
            key: invoice.key().to_string(),
            issuer_tax_id: invoice.issuer_tax_id().to_string(),
            recipient_tax_id: invoice.recipient_tax_id().to_string(),
            total_value: invoice.total_value().to_decimal(),
            status: invoice.status().to_string(),
            created_at: invoice.created_at().to_rfc3339(),
        }
    }
}

// -- Handlers --

/// POST /nfe: issue a new invoice.
#[tracing::instrument(skip(state, payload))]
pub async fn create<R: InvoiceRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    payload: Result<Json<IssueInvoiceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<InvoiceResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let invoice = state
        .invoice_service
        .issue_from_decimal(&req.issuer_tax_id, &req.recipient_tax_id, req.total_value)
        .await?;

    Ok((StatusCode::CREATED, Json(InvoiceResponse::from(&invoice))))
}

/// GET /nfe: list every invoice.
#[tracing::instrument(skip(state))]
pub async fn list<R: InvoiceRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let invoices = state.invoice_service.list().await?;
    Ok(Json(invoices.iter().map(InvoiceResponse::from).collect()))
}

/// GET /nfe/:key: look up an invoice by access key.
#[tracing::instrument(skip(state))]
pub async fn get<R: InvoiceRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(key): Path<String>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = state
        .invoice_service
        .find_by_key(&AccessKey::from(key))
        .await?;
    Ok(Json(InvoiceResponse::from(&invoice)))
}

/// POST /nfe/:key/cancel: cancel an issued invoice.
#[tracing::instrument(skip(state))]
pub async fn cancel<R: InvoiceRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(key): Path<String>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let invoice = state
        .invoice_service
        .cancel(&AccessKey::from(key))
        .await?;
    Ok(Json(InvoiceResponse::from(&invoice)))
}
