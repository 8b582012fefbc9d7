pub mod archive;
pub mod database;
pub mod errors;
pub mod logging;
pub mod pdo;
pub mod root;

pub use archive::ArchiveConfig;
pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use pdo::PdoConfig;
pub use root::{CliOverrides, Config};
