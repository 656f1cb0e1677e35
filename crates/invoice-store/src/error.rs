use thiserror::Error;

use crate::{AccessKey, Version};

/// Errors that can occur when interacting with an invoice repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// An invoice with the same key (or id) is already stored.
    #[error("Invoice already exists: {0}")]
    Conflict(AccessKey),

    /// No invoice is stored under the key.
    #[error("Invoice not found: {0}")]
    NotFound(AccessKey),

    /// The stored version did not match the expected version on update.
    #[error(
        "Concurrency conflict for invoice {key}: expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        key: AccessKey,
        expected: Version,
        actual: Version,
    },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
