pub mod archive_logs;

pub use archive_logs::ArchiveLogsUseCase;
