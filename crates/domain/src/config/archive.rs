use serde::{Deserialize, Serialize};

use crate::retention::DEFAULT_RETENTION_DAYS;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveConfig {
    /// Days of logs kept in the active table.
    #[serde(default = "default_days")]
    pub days: i64,

    /// Days of logs kept in the archive table. Unset disables purging.
    #[serde(default)]
    pub purge: Option<i64>,

    /// Run the copy and delete steps inside one transaction.
    #[serde(default)]
    pub atomic_move: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            purge: None,
            atomic_move: false,
        }
    }
}

fn default_days() -> i64 {
    DEFAULT_RETENTION_DAYS
}
