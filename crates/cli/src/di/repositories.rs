use dblogger_domain::{Config, DomainError};
use dblogger_infrastructure::database::resolve_provider;
use dblogger_infrastructure::repositories::SqlLogArchiveRepository;
use std::sync::Arc;
use tracing::info;

pub struct Repositories {
    pub log_archive: Arc<SqlLogArchiveRepository>,
}

impl Repositories {
    /// Picks the connection strategy; nothing is opened until the first
    /// statement runs.
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let provider = resolve_provider(config)?;
        info!(provider = provider.name(), "Database connection strategy selected");

        Ok(Self {
            log_archive: Arc::new(SqlLogArchiveRepository::new(provider)),
        })
    }

    pub async fn close(&self) {
        self.log_archive.close().await;
    }
}
