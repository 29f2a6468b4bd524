//! Per-file pipeline: parse, create, attach, link.

use crate::frontmatter::parse_task;
use crate::hierarchy::{issue_number_from_url, link_parent};
use crate::tracker::Tracker;
use crate::types::{CreatedIssue, FileOutcome, IssueRef, ProjectHandle, StepOutcome, TaskSpec};
use colored::*;
use eyre::{Context, Result};
use log::{info, warn};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Title used when a document declares none: the file name without extension.
pub fn fallback_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Process one task document.
///
/// Only issue creation decides the outcome; project attachment and parent
/// linking are reported but never fail the file.
pub fn process_task_file(tracker: &mut dyn Tracker, path: &Path, project: Option<&ProjectHandle>) -> FileOutcome {
    println!("Processing: {}", path.display());

    let mut outcome = FileOutcome {
        path: path.to_path_buf(),
        title: fallback_title(path),
        created: None,
        project: StepOutcome::Skipped,
        parent: StepOutcome::Skipped,
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            eprintln!("  {} Failed to read {}: {}", "✗".red(), path.display(), e);
            return outcome;
        }
    };

    let task = parse_task(&content);
    match &task.title {
        Some(title) => outcome.title = title.clone(),
        None => {
            warn!("No title in {}, using {}", path.display(), outcome.title);
            eprintln!("  {} No title in frontmatter, using filename", "!".yellow());
        }
    }

    let url = match create_issue(tracker, &outcome.title, &task) {
        Ok(url) => url,
        Err(e) => {
            warn!("Failed to create issue for {}: {:#}", path.display(), e);
            eprintln!("  {} Failed to create issue for {}: {:#}", "✗".red(), path.display(), e);
            return outcome;
        }
    };

    info!("Created {} from {}", url, path.display());
    println!("  {} Created issue: {}", "✓".green(), url);

    let number = issue_number_from_url(&url);
    outcome.created = Some(CreatedIssue {
        url,
        number: number.clone(),
    });

    let Some(number) = number else {
        return outcome;
    };

    // Internal id of the new issue, resolved at most once.
    let mut issue_id = None;

    if let Some(project) = project {
        outcome.project = StepOutcome::from_success(attach_to_project(tracker, project, &number, &mut issue_id));
        match outcome.project {
            StepOutcome::Done => println!("  {} Added to project: {}", "✓".green(), project.title),
            _ => eprintln!("  {} Failed to add issue to project {}", "!".yellow(), project.title),
        }
    }

    if let Some(parent) = &task.parent {
        outcome.parent = StepOutcome::from_success(link_parent(tracker, parent, &number, issue_id.as_deref()));
        match outcome.parent {
            StepOutcome::Done => println!("  {} Linked to parent: {}", "✓".green(), parent),
            _ => eprintln!("  {} Failed to link parent issue {}", "!".yellow(), parent),
        }
    }

    outcome
}

/// Create the issue with its body staged in a temporary file.
///
/// The file is removed when this function returns, whether or not creation succeeded.
fn create_issue(tracker: &mut dyn Tracker, title: &str, task: &TaskSpec) -> Result<String> {
    let mut body_file = tempfile::Builder::new()
        .prefix("task2issue-")
        .suffix(".md")
        .tempfile()
        .context("Failed to create temporary body file")?;
    body_file
        .write_all(task.body.as_bytes())
        .and_then(|_| body_file.flush())
        .context("Failed to write temporary body file")?;

    tracker.create_issue(title, &task.labels, body_file.path())
}

fn attach_to_project(
    tracker: &mut dyn Tracker,
    project: &ProjectHandle,
    number: &IssueRef,
    issue_id: &mut Option<String>,
) -> bool {
    let result = tracker
        .issue_id(number)
        .with_context(|| format!("Failed to resolve issue {}", number))
        .and_then(|id| {
            let id = issue_id.insert(id);
            tracker.add_to_project(&project.id, id)
        });

    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to add {} to project {}: {:#}", number, project.title, e);
            false
        }
    }
}
