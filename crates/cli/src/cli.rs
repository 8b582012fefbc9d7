use clap::{Args, Parser, Subcommand};
use dblogger_domain::CliOverrides;

#[derive(Parser, Debug)]
#[command(name = "dblogger")]
#[command(version)]
#[command(about = "DBLogger - database log maintenance")]
pub struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Host database URL (overrides [database] url)
    #[arg(long, value_name = "URL", global = true)]
    pub database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Moves the log to its archive
    Archive(ArchiveArgs),
}

#[derive(Args, Debug, Default)]
pub struct ArchiveArgs {
    /// Number of days to preserve, default 30 days
    #[arg(short = 'd', long, value_name = "DAYS", num_args = 0..=1, default_missing_value = "")]
    pub days: Option<String>,

    /// Number of days to preserve on the archive, purge older, default none
    #[arg(short = 'p', long, value_name = "DAYS", num_args = 0..=1, default_missing_value = "")]
    pub purge: Option<String>,

    /// Copy and delete inside a single transaction
    #[arg(long)]
    pub atomic: bool,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        let atomic_move = match &self.command {
            Command::Archive(args) => args.atomic,
        };

        CliOverrides {
            database_url: self.database.clone(),
            log_level: self.log_level.clone(),
            atomic_move,
        }
    }
}
