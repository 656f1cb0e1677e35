//! Invoice service: issue, look up, list and cancel invoices.

use common::AccessKey;
use invoice_store::{InvoiceRepository, RepositoryError, UpdateOptions};

use crate::error::DomainError;

use super::{Invoice, InvoiceError, InvoiceStatus, KeyGenerator, Money, RandomKeyGenerator};

/// Service for issuing and managing invoices.
///
/// Holds no mutable state of its own: every side effect goes through the
/// injected repository.
pub struct InvoiceService<R: InvoiceRepository, G: KeyGenerator = RandomKeyGenerator> {
    repository: R,
    key_generator: G,
}

impl<R: InvoiceRepository> InvoiceService<R> {
    /// Creates a new invoice service over the given repository.
    pub fn new(repository: R) -> Self {
        Self::with_key_generator(repository, RandomKeyGenerator)
    }
}

impl<R: InvoiceRepository, G: KeyGenerator> InvoiceService<R, G> {
    /// Creates a new invoice service with a custom access key source.
    pub fn with_key_generator(repository: R, key_generator: G) -> Self {
        Self {
            repository,
            key_generator,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Issues a new invoice and stores it.
    #[tracing::instrument(skip(self))]
    pub async fn issue(
        &self,
        issuer_tax_id: &str,
        recipient_tax_id: &str,
        total_value: Money,
    ) -> Result<Invoice, DomainError> {
        let invoice = Invoice::create_with(
            &self.key_generator,
            issuer_tax_id,
            recipient_tax_id,
            total_value,
        )
        .inspect_err(|e| {
            tracing::debug!(error = %e, "rejected invoice input");
            reject("issue", "validation");
        })?;

        if let Err(e) = self.repository.put(invoice.to_record()).await {
            tracing::error!(key = %invoice.key(), error = %e, "failed to store invoice");
            reject("issue", "storage");
            return Err(e.into());
        }

        metrics::counter!("invoices_issued_total").increment(1);
        tracing::info!(
            key = %invoice.key(),
            id = %invoice.id(),
            total = %invoice.total_value(),
            "issued invoice"
        );
        Ok(invoice)
    }

    /// Issues a new invoice from a decimal total (e.g. `100.0`).
    ///
    /// The total is rounded to the nearest cent before validation.
    pub async fn issue_from_decimal(
        &self,
        issuer_tax_id: &str,
        recipient_tax_id: &str,
        total_value: f64,
    ) -> Result<Invoice, DomainError> {
        let total = Money::from_decimal(total_value).ok_or_else(|| {
            reject("issue", "validation");
            InvoiceError::InvalidAmount { value: total_value }
        })?;
        self.issue(issuer_tax_id, recipient_tax_id, total).await
    }

    /// Looks up an invoice by access key.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_key(&self, key: &AccessKey) -> Result<Invoice, DomainError> {
        let record = self
            .repository
            .get(key)
            .await?
            .ok_or_else(|| DomainError::NotFound { key: key.clone() })?;

        Invoice::try_from(record)
    }

    /// Cancels an issued invoice.
    ///
    /// The status check and the write form one compare-and-set on the stored
    /// version: of two concurrent cancels exactly one succeeds and the other
    /// fails with `InvalidState`. A failed cancel leaves the stored status
    /// unchanged.
    #[tracing::instrument(skip(self))]
    pub async fn cancel(&self, key: &AccessKey) -> Result<Invoice, DomainError> {
        let mut invoice = self.find_by_key(key).await.inspect_err(|e| {
            if matches!(e, DomainError::NotFound { .. }) {
                reject("cancel", "not_found");
            }
        })?;
        let read_version = invoice.version();

        if invoice.cancel().is_err() {
            return Err(already_cancelled(key, invoice.status()));
        }

        match self
            .repository
            .update(invoice.to_record(), UpdateOptions::expect_version(read_version))
            .await
        {
            Ok(version) => {
                invoice.set_version(version);
                metrics::counter!("invoices_cancelled_total").increment(1);
                tracing::info!(key = %key, "cancelled invoice");
                Ok(invoice)
            }
            Err(RepositoryError::ConcurrencyConflict { .. }) => {
                // Another writer got there first; report what it left behind.
                let current = self.find_by_key(key).await?;
                if current.is_cancelled() {
                    Err(already_cancelled(key, current.status()))
                } else {
                    reject("cancel", "conflict");
                    Err(DomainError::Storage(RepositoryError::ConcurrencyConflict {
                        key: key.clone(),
                        expected: read_version,
                        actual: current.version(),
                    }))
                }
            }
            Err(RepositoryError::NotFound(missing)) => {
                reject("cancel", "not_found");
                Err(DomainError::NotFound { key: missing })
            }
            Err(e) => {
                tracing::error!(key = %key, error = %e, "failed to store cancellation");
                reject("cancel", "storage");
                Err(e.into())
            }
        }
    }

    /// Returns every stored invoice.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Invoice>, DomainError> {
        self.repository
            .list()
            .await?
            .into_iter()
            .map(Invoice::try_from)
            .collect()
    }
}

fn already_cancelled(key: &AccessKey, status: InvoiceStatus) -> DomainError {
    tracing::warn!(key = %key, %status, "rejected cancel of non-issued invoice");
    reject("cancel", "invalid_state");
    DomainError::InvalidState {
        key: key.clone(),
        status,
    }
}

fn reject(operation: &'static str, reason: &'static str) {
    metrics::counter!(
        "invoice_operations_rejected_total",
        "operation" => operation,
        "reason" => reason
    )
    .increment(1);
}
