use serde::{Deserialize, Serialize};
use std::path::Path;

use super::archive::ArchiveConfig;
use super::database::DatabaseConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::pdo::PdoConfig;

const LOCAL_CONFIG_PATH: &str = "dblogger.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/dblogger/config.toml";

/// Main configuration structure for DBLogger
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Direct connection credentials; absent means "use the host database"
    #[serde(default)]
    pub pdo: Option<PdoConfig>,

    /// Host application database
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Default retention windows
    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dblogger.toml in current directory
    /// 3. /etc/dblogger/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(url) = overrides.database_url {
            self.database.url = Some(url);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.atomic_move {
            self.archive.atomic_move = true;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|candidate| Path::new(candidate).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub database_url: Option<String>,
    pub log_level: Option<String>,
    pub atomic_move: bool,
}
