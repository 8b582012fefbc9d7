use crate::ports::{ArchiveProgress, ArchiveStep, LogArchiveRepository, MovedLogs};
use chrono::{Local, NaiveDate};
use dblogger_domain::{ArchiveReport, DomainError, RetentionPolicy};
use std::sync::Arc;
use tracing::info;

/// Moves old rows from `log` to `log_archive`, then optionally purges the
/// archive.
///
/// Steps run strictly in order and the first failure aborts the rest; steps
/// that already completed are not rolled back.
pub struct ArchiveLogsUseCase {
    repository: Arc<dyn LogArchiveRepository>,
    progress: Arc<dyn ArchiveProgress>,
    atomic_move: bool,
}

impl ArchiveLogsUseCase {
    pub fn new(
        repository: Arc<dyn LogArchiveRepository>,
        progress: Arc<dyn ArchiveProgress>,
    ) -> Self {
        Self {
            repository,
            progress,
            atomic_move: false,
        }
    }

    /// Run copy and delete as one transaction instead of two statements.
    pub fn with_atomic_move(mut self, enabled: bool) -> Self {
        self.atomic_move = enabled;
        self
    }

    pub async fn execute(&self, policy: &RetentionPolicy) -> Result<ArchiveReport, DomainError> {
        self.execute_on(policy, Local::now().date_naive()).await
    }

    pub async fn execute_on(
        &self,
        policy: &RetentionPolicy,
        today: NaiveDate,
    ) -> Result<ArchiveReport, DomainError> {
        let archive_cutoff = policy.archive_cutoff(today)?;
        let purge_cutoff = policy.purge_cutoff(today)?;

        info!(
            retention_days = policy.retention_days(),
            purge_days = ?policy.purge_days(),
            %archive_cutoff,
            atomic = self.atomic_move,
            "Starting log archive"
        );

        let moved = if self.atomic_move {
            self.progress.step_started(ArchiveStep::Move);
            let moved = self.repository.move_older_than(archive_cutoff).await?;
            self.progress.step_finished(ArchiveStep::Move, moved.archived);
            moved
        } else {
            self.progress.step_started(ArchiveStep::Archive);
            let archived = self.repository.copy_older_than(archive_cutoff).await?;
            self.progress.step_finished(ArchiveStep::Archive, archived);

            self.progress.step_started(ArchiveStep::Delete);
            let deleted = self.repository.delete_older_than(archive_cutoff).await?;
            self.progress.step_finished(ArchiveStep::Delete, deleted);

            MovedLogs { archived, deleted }
        };

        let purged = match purge_cutoff {
            Some(cutoff) => {
                self.progress.step_started(ArchiveStep::Purge);
                let purged = self.repository.purge_archive_older_than(cutoff).await?;
                self.progress.step_finished(ArchiveStep::Purge, purged);
                Some(purged)
            }
            None => None,
        };

        let report = ArchiveReport {
            archived: moved.archived,
            deleted: moved.deleted,
            purged,
        };

        info!(
            archived = report.archived,
            deleted = report.deleted,
            purged = ?report.purged,
            "Log archive completed"
        );

        Ok(report)
    }
}
