#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use dblogger_domain::DomainError;
use dblogger_infrastructure::database::{ConnectionProvider, DatabasePool};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const LOG_SCHEMA: &str = r#"
    CREATE TABLE {table} (
        id INTEGER PRIMARY KEY,
        channel TEXT NOT NULL,
        level INTEGER NOT NULL,
        message TEXT NOT NULL,
        log_datetime DATETIME NOT NULL
    )
"#;

pub async fn create_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    create_tables(&pool).await;
    pool
}

pub async fn create_tables(pool: &SqlitePool) {
    for table in ["log", "log_archive"] {
        sqlx::query(&LOG_SCHEMA.replace("{table}", table))
            .execute(pool)
            .await
            .unwrap();
    }
}

pub async fn insert_log(pool: &SqlitePool, table: &str, id: i64, log_datetime: &str) {
    sqlx::query(&format!(
        "INSERT INTO {} (id, channel, level, message, log_datetime) VALUES (?, 'app', 200, ?, ?)",
        table
    ))
    .bind(id)
    .bind(format!("message {}", id))
    .bind(log_datetime)
    .execute(pool)
    .await
    .unwrap();
}

/// Inserts a row into `table` stamped `days_ago` days before `today` at noon.
pub async fn insert_aged(pool: &SqlitePool, table: &str, id: i64, today: NaiveDate, days_ago: i64) {
    let stamp = (today - Duration::days(days_ago))
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    insert_log(pool, table, id, &stamp).await;
}

pub async fn ids(pool: &SqlitePool, table: &str) -> Vec<i64> {
    sqlx::query_scalar::<_, i64>(&format!("SELECT id FROM {} ORDER BY id", table))
        .fetch_all(pool)
        .await
        .unwrap()
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Hands out an already-open pool so tests can seed and inspect the same
/// in-memory database the repository writes to.
pub struct SharedPoolProvider {
    pool: SqlitePool,
    connects: Arc<AtomicU64>,
}

impl SharedPoolProvider {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            connects: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn connect_counter(&self) -> Arc<AtomicU64> {
        self.connects.clone()
    }
}

#[async_trait]
impl ConnectionProvider for SharedPoolProvider {
    fn name(&self) -> &'static str {
        "shared"
    }

    async fn connect(&self) -> Result<DatabasePool, DomainError> {
        self.connects.fetch_add(1, Ordering::Relaxed);
        Ok(DatabasePool::Sqlite(self.pool.clone()))
    }
}

/// Always fails, standing in for an unreachable server.
pub struct UnreachableProvider;

#[async_trait]
impl ConnectionProvider for UnreachableProvider {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn connect(&self) -> Result<DatabasePool, DomainError> {
        Err(DomainError::DatabaseError(
            "Failed to connect: connection refused".to_string(),
        ))
    }
}
