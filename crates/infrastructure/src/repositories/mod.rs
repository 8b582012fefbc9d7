pub mod log_archive_repository;

pub use log_archive_repository::SqlLogArchiveRepository;
