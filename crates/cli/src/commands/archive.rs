use crate::bootstrap;
use crate::cli::{ArchiveArgs, Cli};
use crate::di::{Repositories, UseCases};
use crate::progress::ConsoleProgress;
use dblogger_application::ports::ArchiveProgress;
use dblogger_domain::{ArchiveReport, Config, DomainError, RetentionPolicy};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

pub async fn run(cli: &Cli, args: &ArchiveArgs) -> ExitCode {
    let console = Arc::new(ConsoleProgress::stdout());

    match bootstrap::load_config(cli.config.as_deref(), cli.overrides()) {
        Ok(config) => {
            bootstrap::init_logging(&config);
            run_with(&config, args, console).await
        }
        Err(e) => exit_code(Err(e), &console),
    }
}

/// Runs the archive with status lines and the final error, if any, written to
/// `console`.
async fn run_with<W: Write + Send + 'static>(
    config: &Config,
    args: &ArchiveArgs,
    console: Arc<ConsoleProgress<W>>,
) -> ExitCode {
    let result = execute(config, args, console.clone()).await;
    exit_code(result, &console)
}

fn exit_code<W: Write + Send>(
    result: Result<ArchiveReport, DomainError>,
    console: &ConsoleProgress<W>,
) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Log archive failed");
            console.error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Validates the retention windows, then runs the archive against the
/// configured database. The connection, once opened, is closed whatever the
/// outcome.
pub async fn execute(
    config: &Config,
    args: &ArchiveArgs,
    progress: Arc<dyn ArchiveProgress>,
) -> Result<ArchiveReport, DomainError> {
    let (days, purge) = policy_inputs(config, args);
    let policy = RetentionPolicy::parse(&days, purge.as_deref())?;

    let repos = Repositories::new(config)?;
    let use_cases = UseCases::new(&repos, config, progress);

    let result = use_cases.archive_logs.execute(&policy).await;
    repos.close().await;

    if let Ok(report) = &result {
        info!(
            archived = report.archived,
            deleted = report.deleted,
            purged = ?report.purged,
            "Archive run finished"
        );
    }
    result
}

/// Command-line values win over the `[archive]` section.
fn policy_inputs(config: &Config, args: &ArchiveArgs) -> (String, Option<String>) {
    let days = args
        .days
        .clone()
        .unwrap_or_else(|| config.archive.days.to_string());
    let purge = args
        .purge
        .clone()
        .or_else(|| config.archive.purge.map(|purge| purge.to_string()));
    (days, purge)
}
