use super::pool::{Credentials, DatabasePool};
use async_trait::async_trait;
use dblogger_domain::config::{DatabaseConfig, PdoConfig};
use dblogger_domain::{Config, DomainError};
use std::fmt;
use tracing::info;

pub const PDO_INCOMPLETE_MESSAGE: &str =
    "pdo configuration missing or not completed, (url, user and password must be set).";

/// Strategy for obtaining the database the archive statements run against.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn connect(&self) -> Result<DatabasePool, DomainError>;
}

/// Opens a connection from the `[pdo]` credentials.
pub struct DirectConnectionProvider {
    url: String,
    user: String,
    password: String,
    max_connections: u32,
}

impl DirectConnectionProvider {
    pub fn from_config(pdo: &PdoConfig, max_connections: u32) -> Result<Self, DomainError> {
        let (url, user, password) = pdo
            .credentials()
            .ok_or_else(|| DomainError::ConfigError(PDO_INCOMPLETE_MESSAGE.to_string()))?;

        Ok(Self {
            url: url.to_string(),
            user: user.to_string(),
            password: password.to_string(),
            max_connections,
        })
    }
}

impl fmt::Debug for DirectConnectionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectConnectionProvider")
            .field("url", &redact_url(&self.url))
            .field("user", &self.user)
            .field("password", &"***")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[async_trait]
impl ConnectionProvider for DirectConnectionProvider {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn connect(&self) -> Result<DatabasePool, DomainError> {
        info!(user = %self.user, "Connecting with direct credentials");
        let credentials = Credentials {
            user: &self.user,
            password: &self.password,
        };
        DatabasePool::connect(&self.url, Some(credentials), self.max_connections).await
    }
}

/// Reuses the host application's configured database.
pub struct HostConnectionProvider {
    url: String,
    max_connections: u32,
}

impl HostConnectionProvider {
    pub fn from_config(database: &DatabaseConfig) -> Result<Self, DomainError> {
        let url = database.url.clone().ok_or_else(|| {
            DomainError::ConfigError(
                "no database connection configured, set [database] url or a complete [pdo] section"
                    .to_string(),
            )
        })?;

        Ok(Self {
            url,
            max_connections: database.max_connections,
        })
    }
}

impl fmt::Debug for HostConnectionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConnectionProvider")
            .field("url", &redact_url(&self.url))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

#[async_trait]
impl ConnectionProvider for HostConnectionProvider {
    fn name(&self) -> &'static str {
        "host"
    }

    async fn connect(&self) -> Result<DatabasePool, DomainError> {
        info!("Connecting to host application database");
        DatabasePool::connect(&self.url, None, self.max_connections).await
    }
}

/// Masks the `user:password@` part of a connection URL.
fn redact_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let authority_start = scheme_end + 3;
    let rest = &url[authority_start..];
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());

    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}***{}", &url[..authority_start], &rest[at..]),
        None => url.to_string(),
    }
}

/// A `[pdo]` section selects direct credentials; otherwise the host database
/// is used.
pub fn resolve_provider(config: &Config) -> Result<Box<dyn ConnectionProvider>, DomainError> {
    match &config.pdo {
        Some(pdo) => Ok(Box::new(DirectConnectionProvider::from_config(
            pdo,
            config.database.max_connections,
        )?)),
        None => Ok(Box::new(HostConnectionProvider::from_config(
            &config.database,
        )?)),
    }
}
