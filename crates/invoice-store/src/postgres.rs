use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    AccessKey, InvoiceId, InvoiceRecord, RepositoryError, Result, Version,
    repository::{InvoiceRepository, UpdateOptions},
};

const SELECT_COLUMNS: &str = "SELECT key, id, issuer_tax_id, recipient_tax_id, total_cents, \
                              status, created_at, version FROM invoices";

/// PostgreSQL-backed invoice repository.
#[derive(Clone)]
pub struct PostgresInvoiceRepository {
    pool: PgPool,
}

impl PostgresInvoiceRepository {
    /// Creates a new PostgreSQL invoice repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_record(row: PgRow) -> Result<InvoiceRecord> {
        Ok(InvoiceRecord {
            id: InvoiceId::from_uuid(row.try_get::<Uuid, _>("id")?),
            key: AccessKey::new(row.try_get::<String, _>("key")?),
            issuer_tax_id: row.try_get("issuer_tax_id")?,
            recipient_tax_id: row.try_get("recipient_tax_id")?,
            total_cents: row.try_get("total_cents")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            version: Version::new(row.try_get("version")?),
        })
    }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    async fn put(&self, record: InvoiceRecord) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO invoices
                (key, id, issuer_tax_id, recipient_tax_id, total_cents, status, created_at, version)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(record.key.as_str())
        .bind(record.id.as_uuid())
        .bind(&record.issuer_tax_id)
        .bind(&record.recipient_tax_id)
        .bind(record.total_cents)
        .bind(&record.status)
        .bind(record.created_at)
        .bind(record.version.as_i64())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Conflict(record.key));
        }

        tracing::debug!(key = %record.key, "stored invoice");
        Ok(())
    }

    async fn get(&self, key: &AccessKey) -> Result<Option<InvoiceRecord>> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE key = $1"))
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_record).transpose()
    }

    async fn list(&self) -> Result<Vec<InvoiceRecord>> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY created_at, key"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_record).collect()
    }

    async fn update(&self, record: InvoiceRecord, options: UpdateOptions) -> Result<Version> {
        let expected = options.expected_version.map(|v| v.as_i64());

        // Single conditional statement: the version check and the write are
        // atomic at row level.
        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE invoices
            SET status = $2, version = version + 1
            WHERE key = $1 AND ($3::BIGINT IS NULL OR version = $3)
            RETURNING version
            "#,
        )
        .bind(record.key.as_str())
        .bind(&record.status)
        .bind(expected)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(version) = updated {
            tracing::debug!(key = %record.key, version, "updated invoice");
            return Ok(Version::new(version));
        }

        let actual: Option<i64> = sqlx::query_scalar("SELECT version FROM invoices WHERE key = $1")
            .bind(record.key.as_str())
            .fetch_optional(&self.pool)
            .await?;

        match actual {
            None => Err(RepositoryError::NotFound(record.key)),
            Some(actual) => Err(RepositoryError::ConcurrencyConflict {
                key: record.key,
                expected: options
                    .expected_version
                    .unwrap_or_else(|| Version::new(actual)),
                actual: Version::new(actual),
            }),
        }
    }
}
