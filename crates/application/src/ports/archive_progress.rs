use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveStep {
    Archive,
    Delete,
    Move,
    Purge,
}

impl ArchiveStep {
    pub fn label(self) -> &'static str {
        match self {
            ArchiveStep::Archive => "Archiving logs",
            ArchiveStep::Delete => "Deleting logs",
            ArchiveStep::Move => "Moving logs",
            ArchiveStep::Purge => "Purge Archived logs",
        }
    }
}

impl fmt::Display for ArchiveStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receives one `step_started` per step and a matching `step_finished` only
/// when the step succeeded.
pub trait ArchiveProgress: Send + Sync {
    fn step_started(&self, step: ArchiveStep);
    fn step_finished(&self, step: ArchiveStep, rows_affected: u64);
}

pub struct SilentProgress;

impl ArchiveProgress for SilentProgress {
    fn step_started(&self, _step: ArchiveStep) {}
    fn step_finished(&self, _step: ArchiveStep, _rows_affected: u64) {}
}
