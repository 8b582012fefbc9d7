/// Rows affected by each step of one archive run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    pub archived: u64,
    pub deleted: u64,
    /// `None` when no purge window was requested.
    pub purged: Option<u64>,
}

impl ArchiveReport {
    pub fn total_affected(&self) -> u64 {
        self.archived + self.deleted + self.purged.unwrap_or(0)
    }
}
