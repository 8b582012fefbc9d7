use async_trait::async_trait;
use chrono::NaiveDate;
use dblogger_domain::DomainError;

/// Rows touched by an atomic copy-and-delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovedLogs {
    pub archived: u64,
    pub deleted: u64,
}

/// Access to the active `log` table and its `log_archive` twin.
///
/// Every method compares `log_datetime` strictly against `cutoff` and returns
/// the number of rows affected. Implementations acquire their connection on
/// first use and reuse it for the rest of the run.
#[async_trait]
pub trait LogArchiveRepository: Send + Sync {
    /// Copies rows older than `cutoff` from `log` into `log_archive`.
    async fn copy_older_than(&self, cutoff: NaiveDate) -> Result<u64, DomainError>;

    /// Deletes rows older than `cutoff` from `log`.
    async fn delete_older_than(&self, cutoff: NaiveDate) -> Result<u64, DomainError>;

    /// Copy then delete inside a single transaction.
    async fn move_older_than(&self, cutoff: NaiveDate) -> Result<MovedLogs, DomainError>;

    /// Deletes rows older than `cutoff` from `log_archive`.
    async fn purge_archive_older_than(&self, cutoff: NaiveDate) -> Result<u64, DomainError>;
}
