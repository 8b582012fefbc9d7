use super::Repositories;
use dblogger_application::ports::ArchiveProgress;
use dblogger_application::use_cases::ArchiveLogsUseCase;
use dblogger_domain::Config;
use std::sync::Arc;

pub struct UseCases {
    pub archive_logs: Arc<ArchiveLogsUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, config: &Config, progress: Arc<dyn ArchiveProgress>) -> Self {
        Self {
            archive_logs: Arc::new(
                ArchiveLogsUseCase::new(repos.log_archive.clone(), progress)
                    .with_atomic_move(config.archive.atomic_move),
            ),
        }
    }
}
