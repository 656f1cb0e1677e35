//! Invoice entity and related types.

mod entity;
mod key;
mod service;
mod state;
mod value_objects;

pub use entity::Invoice;
pub use key::{KeyGenerator, RandomKeyGenerator};
pub use service::InvoiceService;
pub use state::InvoiceStatus;
pub use value_objects::{Money, TAX_ID_LEN, TaxId};

use thiserror::Error;

/// Errors raised by the invoice entity itself.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Issuer tax id is not exactly 14 digits.
    #[error("Invalid issuer tax id: {0:?} (must be exactly 14 digits)")]
    InvalidIssuerTaxId(String),

    /// Recipient tax id is not exactly 14 digits.
    #[error("Invalid recipient tax id: {0:?} (must be exactly 14 digits)")]
    InvalidRecipientTaxId(String),

    /// Total value is zero or negative.
    #[error("Invalid total value: {total} (must be greater than 0)")]
    NonPositiveTotal { total: Money },

    /// Total value is not a representable amount.
    #[error("Invalid total value: {value} (must be a finite amount)")]
    InvalidAmount { value: f64 },

    /// Status name is not one of the known statuses.
    #[error("Unknown invoice status: {0:?}")]
    UnknownStatus(String),

    /// The requested status change is not a legal transition.
    #[error("Invalid status transition: cannot move from {from} to {to}")]
    InvalidStatusTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },
}
