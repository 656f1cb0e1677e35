//! Domain layer for the NF-e issuing service.
//!
//! This crate provides:
//! - the Invoice entity and its factory
//! - access key generation
//! - the invoice status state machine
//! - InvoiceService, which issues, looks up, lists and cancels invoices
//!   through an injected repository

pub mod error;
pub mod invoice;

pub use error::DomainError;
pub use invoice::{
    Invoice, InvoiceError, InvoiceService, InvoiceStatus, KeyGenerator, Money,
    RandomKeyGenerator, TaxId,
};
