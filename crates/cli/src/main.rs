use clap::Parser;
use cli::{Cli, Command};
use std::process::ExitCode;

mod bootstrap;
mod cli;
mod commands;
mod di;
mod progress;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match &cli.command {
        Command::Archive(args) => commands::archive::run(&cli, args).await,
    }
}
