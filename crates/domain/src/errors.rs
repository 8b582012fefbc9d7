use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    ConfigError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, DomainError::InvalidArgument(_))
    }

    pub fn is_config_error(&self) -> bool {
        matches!(self, DomainError::ConfigError(_))
    }
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        DomainError::ConfigError(err.to_string())
    }
}
