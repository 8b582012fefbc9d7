use chrono::{Duration, NaiveDate};

use crate::errors::DomainError;

/// Days of logs kept in the active table when nothing else is configured.
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Validated pair of retention windows for one archive run.
///
/// A policy can only be built when the purge window (if any) strictly
/// outlives the retention window, so holding one means no argument check
/// is left to do before touching the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    retention_days: i64,
    purge_days: Option<i64>,
}

impl RetentionPolicy {
    pub fn new(retention_days: i64, purge_days: Option<i64>) -> Result<Self, DomainError> {
        if let Some(purge_days) = purge_days {
            if retention_days >= purge_days {
                return Err(DomainError::InvalidArgument(format!(
                    "Purge days ({}) must be greater than Archive days ({})",
                    purge_days, retention_days
                )));
            }
        }

        Ok(Self {
            retention_days,
            purge_days,
        })
    }

    /// Builds a policy from the raw option strings given on the command line.
    pub fn parse(days: &str, purge: Option<&str>) -> Result<Self, DomainError> {
        let retention_days = parse_days(days).ok_or_else(|| {
            DomainError::InvalidArgument("Days is not a valid number".to_string())
        })?;

        let purge_days = purge
            .map(|value| {
                parse_days(value).ok_or_else(|| {
                    DomainError::InvalidArgument("Purge days is not a valid number".to_string())
                })
            })
            .transpose()?;

        Self::new(retention_days, purge_days)
    }

    pub fn retention_days(&self) -> i64 {
        self.retention_days
    }

    pub fn purge_days(&self) -> Option<i64> {
        self.purge_days
    }

    pub fn purges_archive(&self) -> bool {
        self.purge_days.is_some()
    }

    /// Rows in the active table strictly older than this date are archived.
    pub fn archive_cutoff(&self, today: NaiveDate) -> Result<NaiveDate, DomainError> {
        days_before(today, self.retention_days)
    }

    /// Rows in the archive strictly older than this date are purged.
    pub fn purge_cutoff(&self, today: NaiveDate) -> Result<Option<NaiveDate>, DomainError> {
        self.purge_days
            .map(|days| days_before(today, days))
            .transpose()
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
            purge_days: None,
        }
    }
}

fn parse_days(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

fn days_before(today: NaiveDate, days: i64) -> Result<NaiveDate, DomainError> {
    Duration::try_days(days)
        .and_then(|delta| today.checked_sub_signed(delta))
        .ok_or_else(|| {
            DomainError::InvalidArgument(format!(
                "{} days is outside the supported date range",
                days
            ))
        })
}
