use chrono::NaiveDate;
use dblogger_domain::DomainError;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
    MySql,
}

impl Backend {
    pub fn from_url(url: &str) -> Result<Self, DomainError> {
        let scheme = url
            .split(':')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match scheme.as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            "mysql" => Ok(Backend::MySql),
            _ => Err(DomainError::ConfigError(format!(
                "Unsupported database URL scheme '{}' (expected sqlite, postgres or mysql)",
                scheme
            ))),
        }
    }

    /// Positional marker for the first bound parameter.
    pub fn placeholder(self) -> &'static str {
        match self {
            Backend::Postgres => "$1",
            Backend::Sqlite | Backend::MySql => "?",
        }
    }
}

#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub user: &'a str,
    pub password: &'a str,
}

/// A connection pool for whichever backend the URL names.
#[derive(Debug, Clone)]
pub enum DatabasePool {
    Sqlite(SqlitePool),
    Postgres(PgPool),
    MySql(MySqlPool),
}

// Same body for every backend; only the pool type differs.
macro_rules! in_transaction {
    ($pool:expr, $statements:expr, $cutoff:expr) => {{
        let mut tx = $pool.begin().await?;
        let mut affected = Vec::with_capacity($statements.len());
        for &sql in $statements {
            let result = sqlx::query(sql).bind($cutoff).execute(&mut *tx).await?;
            affected.push(result.rows_affected());
        }
        tx.commit().await?;
        Ok(affected)
    }};
}

impl DatabasePool {
    pub async fn connect(
        url: &str,
        credentials: Option<Credentials<'_>>,
        max_connections: u32,
    ) -> Result<Self, DomainError> {
        let pool = match Backend::from_url(url)? {
            Backend::Sqlite => {
                if credentials.is_some() {
                    debug!("SQLite has no authentication, ignoring configured credentials");
                }
                let options = SqliteConnectOptions::from_str(url).map_err(connect_error)?;
                let pool = SqlitePoolOptions::new()
                    .max_connections(max_connections)
                    .connect_with(options)
                    .await
                    .map_err(connect_error)?;
                DatabasePool::Sqlite(pool)
            }
            Backend::Postgres => {
                let mut options = PgConnectOptions::from_str(url).map_err(connect_error)?;
                if let Some(credentials) = credentials {
                    options = options
                        .username(credentials.user)
                        .password(credentials.password);
                }
                let pool = PgPoolOptions::new()
                    .max_connections(max_connections)
                    .connect_with(options)
                    .await
                    .map_err(connect_error)?;
                DatabasePool::Postgres(pool)
            }
            Backend::MySql => {
                let mut options = MySqlConnectOptions::from_str(url).map_err(connect_error)?;
                if let Some(credentials) = credentials {
                    options = options
                        .username(credentials.user)
                        .password(credentials.password);
                }
                let pool = MySqlPoolOptions::new()
                    .max_connections(max_connections)
                    .connect_with(options)
                    .await
                    .map_err(connect_error)?;
                DatabasePool::MySql(pool)
            }
        };

        Ok(pool)
    }

    pub fn backend(&self) -> Backend {
        match self {
            DatabasePool::Sqlite(_) => Backend::Sqlite,
            DatabasePool::Postgres(_) => Backend::Postgres,
            DatabasePool::MySql(_) => Backend::MySql,
        }
    }

    /// Runs one statement with `cutoff` bound to its single placeholder.
    pub async fn execute_with_cutoff(
        &self,
        sql: &str,
        cutoff: NaiveDate,
    ) -> Result<u64, sqlx::Error> {
        let result = match self {
            DatabasePool::Sqlite(pool) => sqlx::query(sql)
                .bind(cutoff)
                .execute(pool)
                .await?
                .rows_affected(),
            DatabasePool::Postgres(pool) => sqlx::query(sql)
                .bind(cutoff)
                .execute(pool)
                .await?
                .rows_affected(),
            DatabasePool::MySql(pool) => sqlx::query(sql)
                .bind(cutoff)
                .execute(pool)
                .await?
                .rows_affected(),
        };
        Ok(result)
    }

    /// Runs the statements in order inside one transaction. Nothing is
    /// committed unless every statement succeeds.
    pub async fn execute_in_transaction(
        &self,
        statements: &[&str],
        cutoff: NaiveDate,
    ) -> Result<Vec<u64>, sqlx::Error> {
        match self {
            DatabasePool::Sqlite(pool) => in_transaction!(pool, statements, cutoff),
            DatabasePool::Postgres(pool) => in_transaction!(pool, statements, cutoff),
            DatabasePool::MySql(pool) => in_transaction!(pool, statements, cutoff),
        }
    }

    pub async fn close(&self) {
        match self {
            DatabasePool::Sqlite(pool) => pool.close().await,
            DatabasePool::Postgres(pool) => pool.close().await,
            DatabasePool::MySql(pool) => pool.close().await,
        }
    }
}

fn connect_error(e: sqlx::Error) -> DomainError {
    error!(error = %e, "Failed to open database connection");
    DomainError::DatabaseError(format!("Failed to connect: {}", e))
}
