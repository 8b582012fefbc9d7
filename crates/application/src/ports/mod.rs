mod archive_progress;
mod log_archive_repository;

pub use archive_progress::{ArchiveProgress, ArchiveStep, SilentProgress};
pub use log_archive_repository::{LogArchiveRepository, MovedLogs};
