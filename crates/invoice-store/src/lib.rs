//! Storage layer for issued invoices.
//!
//! Defines the [`InvoiceRepository`] contract keyed by access key, the
//! flat [`InvoiceRecord`] it persists, and two backends: an in-memory map
//! for tests and single-process deployments, and PostgreSQL.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod repository;

pub use common::{AccessKey, InvoiceId};
pub use error::{RepositoryError, Result};
pub use memory::InMemoryInvoiceRepository;
pub use postgres::PostgresInvoiceRepository;
pub use record::{InvoiceRecord, Version};
pub use repository::{InvoiceRepository, InvoiceRepositoryExt, UpdateOptions};
