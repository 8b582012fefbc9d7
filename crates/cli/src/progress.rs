use dblogger_application::ports::{ArchiveProgress, ArchiveStep};
use std::fmt;
use std::io::{self, Stdout, Write};
use std::sync::Mutex;
use tracing::debug;

/// Prints `"<step>... "` when a step starts and `OK` once it succeeds, so a
/// failing step leaves its line open for the error message.
pub struct ConsoleProgress<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleProgress<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Ends the current line with the failure, after an open step label if
    /// one is pending.
    pub fn error(&self, message: &dyn fmt::Display) {
        self.write(&format!("ERROR: {}\n", message));
    }

    fn write(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Best effort: a closed stdout is ignored.
        let _ = out.write_all(text.as_bytes()).and_then(|_| out.flush());
    }
}

impl<W: Write + Send> ArchiveProgress for ConsoleProgress<W> {
    fn step_started(&self, step: ArchiveStep) {
        self.write(&format!("{}... ", step));
    }

    fn step_finished(&self, step: ArchiveStep, rows_affected: u64) {
        debug!(%step, rows_affected, "Step finished");
        self.write("OK\n");
    }
}
