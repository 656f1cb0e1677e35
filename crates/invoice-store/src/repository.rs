use async_trait::async_trait;

use crate::{AccessKey, InvoiceRecord, Result, Version};

/// Options for updating a stored invoice.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Expected stored version for optimistic concurrency control.
    /// If None, no version check is performed (use with caution).
    pub expected_version: Option<Version>,
}

impl UpdateOptions {
    /// Creates options with no version check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options expecting the stored invoice to be at a specific version.
    pub fn expect_version(version: Version) -> Self {
        Self {
            expected_version: Some(version),
        }
    }
}

/// Keyed store of invoices.
///
/// The access key is the sole lookup key. There is no delete: an invoice
/// lives until the store itself is torn down. All implementations must be
/// thread-safe (Send + Sync) and make `put` and `update` atomic with respect
/// to concurrent callers.
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Inserts a new invoice.
    ///
    /// Fails with `Conflict` if an invoice with the same key or id is
    /// already stored; the existing entry is left untouched.
    async fn put(&self, record: InvoiceRecord) -> Result<()>;

    /// Looks up an invoice by exact key.
    ///
    /// Returns None if no invoice is stored under the key.
    async fn get(&self, key: &AccessKey) -> Result<Option<InvoiceRecord>>;

    /// Returns all stored invoices.
    ///
    /// The order is stable within a process run (issue time, then key) but
    /// is not part of the contract.
    async fn list(&self) -> Result<Vec<InvoiceRecord>>;

    /// Replaces the mutable state (status) of a stored invoice.
    ///
    /// Identity fields, tax ids, total and creation time are never
    /// overwritten. Fails with `NotFound` if the key is absent, and with
    /// `ConcurrencyConflict` if `options.expected_version` is set and does not
    /// match the stored version.
    ///
    /// Returns the new stored version.
    async fn update(&self, record: InvoiceRecord, options: UpdateOptions) -> Result<Version>;
}

/// Extension trait providing convenience methods for repositories.
#[async_trait]
pub trait InvoiceRepositoryExt: InvoiceRepository {
    /// Checks whether an invoice is stored under the key.
    async fn contains(&self, key: &AccessKey) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// Returns the number of stored invoices.
    async fn count(&self) -> Result<usize> {
        Ok(self.list().await?.len())
    }
}

// Blanket implementation for all InvoiceRepository implementations
impl<T: InvoiceRepository + ?Sized> InvoiceRepositoryExt for T {}
