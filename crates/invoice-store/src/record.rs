use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccessKey, InvoiceId};

/// Version number for a stored invoice, used for optimistic concurrency control.
///
/// A freshly issued invoice is stored at version 1; every successful update
/// increments the stored version by 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(i64);

impl Version {
    /// Creates a new version from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the version of a newly inserted invoice.
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw version value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Version {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Version> for i64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

/// Flat storage representation of an invoice.
///
/// The repository does not interpret the fields; validation belongs to the
/// domain layer, which converts records to and from its `Invoice` entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Opaque invoice identifier.
    pub id: InvoiceId,

    /// Access key, the lookup key of the repository.
    pub key: AccessKey,

    /// Issuer tax identifier (CNPJ digits).
    pub issuer_tax_id: String,

    /// Recipient tax identifier (CNPJ digits).
    pub recipient_tax_id: String,

    /// Invoice total in cents.
    pub total_cents: i64,

    /// Status name, e.g. `"Issued"`.
    pub status: String,

    /// When the invoice was issued.
    pub created_at: DateTime<Utc>,

    /// Stored version.
    pub version: Version,
}
