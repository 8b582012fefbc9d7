//! DBLogger Domain Layer
pub mod archive_report;
pub mod config;
pub mod errors;
pub mod retention;

pub use archive_report::ArchiveReport;
pub use config::{CliOverrides, Config};
pub use errors::DomainError;
pub use retention::{RetentionPolicy, DEFAULT_RETENTION_DAYS};
