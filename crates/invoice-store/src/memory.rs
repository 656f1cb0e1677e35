use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    AccessKey, InvoiceId, InvoiceRecord, RepositoryError, Result, Version,
    repository::{InvoiceRepository, UpdateOptions},
};

#[derive(Default)]
struct Store {
    invoices: HashMap<AccessKey, InvoiceRecord>,
    /// Ids of every stored invoice, kept in step with `invoices`.
    ids: HashSet<InvoiceId>,
}

/// In-memory invoice repository.
///
/// Stores all invoices in a map guarded by a single lock; `put` and `update`
/// run their check and write under the write lock. Cloning yields another
/// handle to the same map.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryInvoiceRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored invoices.
    pub async fn len(&self) -> usize {
        self.store.read().await.invoices.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.invoices.is_empty()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn put(&self, record: InvoiceRecord) -> Result<()> {
        let mut store = self.store.write().await;

        if store.invoices.contains_key(&record.key) || store.ids.contains(&record.id) {
            return Err(RepositoryError::Conflict(record.key));
        }

        tracing::debug!(key = %record.key, "storing invoice");
        store.ids.insert(record.id);
        store.invoices.insert(record.key.clone(), record);
        Ok(())
    }

    async fn get(&self, key: &AccessKey) -> Result<Option<InvoiceRecord>> {
        Ok(self.store.read().await.invoices.get(key).cloned())
    }

    async fn list(&self) -> Result<Vec<InvoiceRecord>> {
        let store = self.store.read().await;
        let mut records: Vec<_> = store.invoices.values().cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.key.cmp(&b.key)));
        Ok(records)
    }

    async fn update(&self, record: InvoiceRecord, options: UpdateOptions) -> Result<Version> {
        let mut store = self.store.write().await;

        let stored = store
            .invoices
            .get_mut(&record.key)
            .ok_or_else(|| RepositoryError::NotFound(record.key.clone()))?;

        if let Some(expected) = options.expected_version
            && stored.version != expected
        {
            return Err(RepositoryError::ConcurrencyConflict {
                key: record.key,
                expected,
                actual: stored.version,
            });
        }

        stored.status = record.status;
        stored.version = stored.version.next();

        tracing::debug!(key = %stored.key, version = %stored.version, "updated invoice");
        Ok(stored.version)
    }
}
