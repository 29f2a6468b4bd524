//! task2issue CLI - create GitHub issues from task documents.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use task2issue::{GhCli, GhConfig, RunConfig, run};

mod cli;

use cli::{APP_NAME, Cli};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join(format!("{}.log", APP_NAME));

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_cli(cli: Cli) -> Result<bool> {
    let mut gh_config = GhConfig::new().with_program(cli.gh);
    if let Some(repo) = cli.repo {
        gh_config = gh_config.with_repo(repo);
    }
    let mut tracker = GhCli::new(gh_config);

    let config = RunConfig::new(cli.target_folder)
        .dry_run(cli.dry_run)
        .attach_project(!cli.no_project);

    let outcome = run(&config, &mut tracker)?;
    Ok(outcome.is_success())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("Command: {:?}", std::env::args().collect::<Vec<_>>());

    match run_cli(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}
