#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use dblogger_application::ports::{
    ArchiveProgress, ArchiveStep, LogArchiveRepository, MovedLogs,
};
use dblogger_domain::DomainError;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub id: u64,
    pub log_datetime: NaiveDateTime,
}

/// In-memory `log` / `log_archive` pair that records every statement issued.
pub struct MockLogArchiveRepository {
    today: NaiveDate,
    log: Arc<RwLock<Vec<LogRow>>>,
    archive: Arc<RwLock<Vec<LogRow>>>,
    calls: Arc<Mutex<Vec<&'static str>>>,
    fail_on: Arc<Mutex<Option<&'static str>>>,
    next_id: Arc<Mutex<u64>>,
}

impl MockLogArchiveRepository {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            log: Arc::new(RwLock::new(Vec::new())),
            archive: Arc::new(RwLock::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_on: Arc::new(Mutex::new(None)),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    fn row_aged(&self, days_ago: i64) -> LogRow {
        let mut next_id = self.next_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;
        let log_datetime = (self.today - Duration::days(days_ago))
            .and_hms_opt(12, 0, 0)
            .unwrap();
        LogRow { id, log_datetime }
    }

    pub async fn add_log(&self, days_ago: i64) {
        let row = self.row_aged(days_ago);
        self.log.write().await.push(row);
    }

    pub async fn add_archived(&self, days_ago: i64) {
        let row = self.row_aged(days_ago);
        self.archive.write().await.push(row);
    }

    pub async fn log_rows(&self) -> Vec<LogRow> {
        self.log.read().await.clone()
    }

    pub async fn archive_rows(&self) -> Vec<LogRow> {
        self.archive.read().await.clone()
    }

    pub async fn log_count(&self) -> usize {
        self.log.read().await.len()
    }

    pub async fn archive_count(&self) -> usize {
        self.archive.read().await.len()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_on(&self, call: &'static str) {
        *self.fail_on.lock().unwrap() = Some(call);
    }

    fn record(&self, call: &'static str) -> Result<(), DomainError> {
        self.calls.lock().unwrap().push(call);
        if *self.fail_on.lock().unwrap() == Some(call) {
            return Err(DomainError::DatabaseError(format!("{} failed", call)));
        }
        Ok(())
    }
}

fn older_than(row: &LogRow, cutoff: NaiveDate) -> bool {
    row.log_datetime < cutoff.and_hms_opt(0, 0, 0).unwrap()
}

#[async_trait]
impl LogArchiveRepository for MockLogArchiveRepository {
    async fn copy_older_than(&self, cutoff: NaiveDate) -> Result<u64, DomainError> {
        self.record("copy")?;
        let matching: Vec<LogRow> = self
            .log
            .read()
            .await
            .iter()
            .filter(|row| older_than(row, cutoff))
            .cloned()
            .collect();
        let count = matching.len() as u64;
        self.archive.write().await.extend(matching);
        Ok(count)
    }

    async fn delete_older_than(&self, cutoff: NaiveDate) -> Result<u64, DomainError> {
        self.record("delete")?;
        let mut log = self.log.write().await;
        let before = log.len();
        log.retain(|row| !older_than(row, cutoff));
        Ok((before - log.len()) as u64)
    }

    async fn move_older_than(&self, cutoff: NaiveDate) -> Result<MovedLogs, DomainError> {
        self.record("move")?;
        let mut log = self.log.write().await;
        let (moved, kept): (Vec<LogRow>, Vec<LogRow>) =
            log.drain(..).partition(|row| older_than(row, cutoff));
        *log = kept;
        let count = moved.len() as u64;
        self.archive.write().await.extend(moved);
        Ok(MovedLogs {
            archived: count,
            deleted: count,
        })
    }

    async fn purge_archive_older_than(&self, cutoff: NaiveDate) -> Result<u64, DomainError> {
        self.record("purge")?;
        let mut archive = self.archive.write().await;
        let before = archive.len();
        archive.retain(|row| !older_than(row, cutoff));
        Ok((before - archive.len()) as u64)
    }
}

/// Captures progress callbacks the way the console would print them.
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ArchiveProgress for RecordingProgress {
    fn step_started(&self, step: ArchiveStep) {
        self.events.lock().unwrap().push(format!("{}...", step));
    }

    fn step_finished(&self, step: ArchiveStep, rows_affected: u64) {
        self.events
            .lock()
            .unwrap()
            .push(format!("{} OK ({})", step, rows_affected));
    }
}
