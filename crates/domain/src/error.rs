//! Domain error types.

use common::AccessKey;
use invoice_store::RepositoryError;
use thiserror::Error;

use crate::invoice::{InvoiceError, InvoiceStatus};

/// Errors returned by [`InvoiceService`](crate::InvoiceService) operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed input: tax id not 14 digits, non-positive total.
    #[error("Validation error: {0}")]
    Validation(#[from] InvoiceError),

    /// No invoice is stored under the key.
    #[error("Invoice not found: {key}")]
    NotFound { key: AccessKey },

    /// The invoice's status does not allow the operation.
    #[error("Invoice {key} is already {status}")]
    InvalidState {
        key: AccessKey,
        status: InvoiceStatus,
    },

    /// The repository failed or reported an anomaly (e.g. key collision).
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    /// A stored record could not be turned back into an invoice.
    #[error("Corrupt invoice record {key}: {reason}")]
    CorruptRecord { key: AccessKey, reason: String },
}
