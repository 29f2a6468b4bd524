//! CLI argument parsing for task2issue.

use clap::Parser;
use std::path::PathBuf;

/// Name used for the binary, the log directory and the log file.
pub const APP_NAME: &str = "task2issue";

/// Log location shown in `--help`, relative to the user's data directory.
fn log_hint() -> String {
    format!("Logs are written to: ~/.local/share/{0}/logs/{0}.log", APP_NAME)
}

#[derive(Parser)]
#[command(
    name = APP_NAME,
    about = "Create GitHub issues from TASK-???.md files",
    version = env!("GIT_DESCRIBE"),
    after_help = log_hint()
)]
pub struct Cli {
    /// Folder containing TASK-???.md files
    pub target_folder: PathBuf,

    /// Show what would be done without creating issues
    #[arg(long)]
    pub dry_run: bool,

    /// Do not add created issues to the repository's project
    #[arg(long)]
    pub no_project: bool,

    /// Target repository as OWNER/NAME (default: inferred by gh)
    #[arg(short = 'R', long)]
    pub repo: Option<String>,

    /// Path to the gh executable
    #[arg(long, default_value = "gh")]
    pub gh: PathBuf,
}
