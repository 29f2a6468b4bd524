//! Batch processing of a folder of task documents.

use crate::config::RunConfig;
use crate::locator::{TASK_FILE_PATTERN, find_task_files};
use crate::pipeline::process_task_file;
use crate::preview::{PreviewEntry, preview};
use crate::tracker::Tracker;
use crate::types::{FileOutcome, ProjectHandle};
use colored::*;
use eyre::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

/// Result of processing a batch of files.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// One entry per file, in processing order.
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    /// True iff every file's issue was created.
    pub fn is_success(&self) -> bool {
        self.succeeded() == self.total()
    }
}

/// What a whole run did.
#[derive(Debug)]
pub enum RunOutcome {
    /// No task documents in the folder.
    NoFiles,
    /// Dry run; nothing was sent to the tracker.
    Preview(Vec<PreviewEntry>),
    /// Live run.
    Batch(BatchSummary),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            RunOutcome::NoFiles | RunOutcome::Preview(_) => true,
            RunOutcome::Batch(summary) => summary.is_success(),
        }
    }
}

/// Look up the repository's first project once for the whole run.
///
/// Absence and lookup failures both yield None.
pub fn resolve_project(tracker: &mut dyn Tracker) -> Option<ProjectHandle> {
    match tracker.first_project() {
        Ok(Some(project)) => {
            info!("Using project '{}' ({})", project.title, project.id);
            println!("{} Using project: {}", "→".blue(), project.title);
            Some(project)
        }
        Ok(None) => {
            info!("No project found for repository");
            eprintln!("{} No project found for this repository, skipping project attachment", "!".yellow());
            None
        }
        Err(e) => {
            warn!("Project lookup failed: {:#}", e);
            eprintln!("{} Could not look up project: {:#}", "!".yellow(), e);
            None
        }
    }
}

/// Process files strictly in the given order, one at a time.
pub fn run_batch(tracker: &mut dyn Tracker, files: &[PathBuf], project: Option<&ProjectHandle>) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for path in files {
        summary.outcomes.push(process_task_file(tracker, path, project));
    }

    summary
}

/// Run the whole tool against `config.target_dir`.
///
/// Fails only when the target folder is unusable; per-file failures are
/// reflected in the returned outcome.
pub fn run(config: &RunConfig, tracker: &mut dyn Tracker) -> Result<RunOutcome> {
    let target_dir = config
        .target_dir
        .canonicalize()
        .with_context(|| format!("{} is not a directory", config.target_dir.display()))?;
    let files = find_task_files(&target_dir)?;

    if files.is_empty() {
        println!("No {} files found in {}", TASK_FILE_PATTERN, target_dir.display());
        return Ok(RunOutcome::NoFiles);
    }

    println!("Found {} task file(s)", files.len());

    if config.dry_run {
        let entries = preview(&files, config.attach_project);
        println!("\n{} Dry run - would process:", "→".blue());
        for entry in &entries {
            println!("  {}", entry);
        }
        return Ok(RunOutcome::Preview(entries));
    }

    let project = if config.attach_project {
        resolve_project(tracker)
    } else {
        None
    };

    let summary = run_batch(tracker, &files, project.as_ref());
    println!(
        "\nProcessed {}/{} task files successfully",
        summary.succeeded(),
        summary.total()
    );
    info!("Run finished: {}/{} succeeded", summary.succeeded(), summary.total());

    Ok(RunOutcome::Batch(summary))
}
