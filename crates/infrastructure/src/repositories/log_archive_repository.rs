use crate::database::{Backend, ConnectionProvider, DatabasePool};
use async_trait::async_trait;
use chrono::NaiveDate;
use dblogger_application::ports::{LogArchiveRepository, MovedLogs};
use dblogger_domain::DomainError;
use tokio::sync::OnceCell;
use tracing::{error, info, instrument};

const LOG_TABLE: &str = "log";
const ARCHIVE_TABLE: &str = "log_archive";

fn copy_sql(backend: Backend) -> String {
    format!(
        "INSERT INTO {} SELECT * FROM {} WHERE log_datetime < {}",
        ARCHIVE_TABLE,
        LOG_TABLE,
        backend.placeholder()
    )
}

fn delete_sql(table: &str, backend: Backend) -> String {
    format!(
        "DELETE FROM {} WHERE log_datetime < {}",
        table,
        backend.placeholder()
    )
}

/// SQL-backed `log` / `log_archive` access.
///
/// The connection is opened through the provider on the first statement and
/// shared by every later one; `close` releases it.
pub struct SqlLogArchiveRepository {
    provider: Box<dyn ConnectionProvider>,
    pool: OnceCell<DatabasePool>,
}

impl SqlLogArchiveRepository {
    pub fn new(provider: Box<dyn ConnectionProvider>) -> Self {
        Self {
            provider,
            pool: OnceCell::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    pub async fn close(&self) {
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            info!("Database connection closed");
        }
    }

    async fn pool(&self) -> Result<&DatabasePool, DomainError> {
        self.pool
            .get_or_try_init(|| async {
                let pool = self.provider.connect().await?;
                info!(
                    provider = self.provider.name(),
                    backend = ?pool.backend(),
                    "Database connection established"
                );
                Ok::<_, DomainError>(pool)
            })
            .await
    }

    async fn execute(&self, sql: &str, cutoff: NaiveDate, what: &str) -> Result<u64, DomainError> {
        let pool = self.pool().await?;
        pool.execute_with_cutoff(sql, cutoff).await.map_err(|e| {
            error!(error = %e, "Failed to {}", what);
            DomainError::DatabaseError(format!("Failed to {}: {}", what, e))
        })
    }
}

#[async_trait]
impl LogArchiveRepository for SqlLogArchiveRepository {
    #[instrument(skip(self))]
    async fn copy_older_than(&self, cutoff: NaiveDate) -> Result<u64, DomainError> {
        let backend = self.pool().await?.backend();
        let copied = self
            .execute(&copy_sql(backend), cutoff, "archive logs")
            .await?;
        info!(copied, "Logs copied to archive");
        Ok(copied)
    }

    #[instrument(skip(self))]
    async fn delete_older_than(&self, cutoff: NaiveDate) -> Result<u64, DomainError> {
        let backend = self.pool().await?.backend();
        let deleted = self
            .execute(&delete_sql(LOG_TABLE, backend), cutoff, "delete logs")
            .await?;
        info!(deleted, "Archived logs deleted");
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn move_older_than(&self, cutoff: NaiveDate) -> Result<MovedLogs, DomainError> {
        let pool = self.pool().await?;
        let backend = pool.backend();
        let copy = copy_sql(backend);
        let delete = delete_sql(LOG_TABLE, backend);

        let affected = pool
            .execute_in_transaction(&[copy.as_str(), delete.as_str()], cutoff)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to move logs, transaction rolled back");
                DomainError::DatabaseError(format!("Failed to move logs: {}", e))
            })?;

        let moved = MovedLogs {
            archived: affected.first().copied().unwrap_or(0),
            deleted: affected.get(1).copied().unwrap_or(0),
        };
        info!(
            archived = moved.archived,
            deleted = moved.deleted,
            "Logs moved to archive"
        );
        Ok(moved)
    }

    #[instrument(skip(self))]
    async fn purge_archive_older_than(&self, cutoff: NaiveDate) -> Result<u64, DomainError> {
        let backend = self.pool().await?.backend();
        let purged = self
            .execute(
                &delete_sql(ARCHIVE_TABLE, backend),
                cutoff,
                "purge archived logs",
            )
            .await?;
        info!(purged, "Archived logs purged");
        Ok(purged)
    }
}
