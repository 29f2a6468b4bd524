//! Capability interface to the issue tracker.

use crate::types::{IssueRef, ProjectHandle};
use eyre::Result;
use std::path::Path;

/// Errors raised by tracker implementations.
#[derive(Debug)]
pub enum TrackerError {
    /// The client program could not be started.
    Spawn { program: String, message: String },
    /// The client exited unsuccessfully.
    CommandFailed { command: String, stderr: String },
    /// The client succeeded but printed something we could not interpret.
    UnexpectedOutput(String),
    /// GraphQL call returned an `errors` array.
    GraphQl(String),
    /// No repository could be determined for the current context.
    NoRepository,
}

impl std::fmt::Display for TrackerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerError::Spawn { program, message } => write!(f, "failed to run {}: {}", program, message),
            TrackerError::CommandFailed { command, stderr } => {
                write!(f, "`{}` failed: {}", command, stderr.trim())
            }
            TrackerError::UnexpectedOutput(output) => write!(f, "unexpected tracker output: {}", output.trim()),
            TrackerError::GraphQl(message) => write!(f, "GraphQL error: {}", message),
            TrackerError::NoRepository => write!(f, "could not determine the current repository"),
        }
    }
}

impl std::error::Error for TrackerError {}

/// Operations the pipeline needs from an issue tracker.
///
/// Every call is a blocking round-trip. Implementations do not retry.
pub trait Tracker {
    /// Create an issue whose description is read from `body_file`; returns its URL.
    fn create_issue(&mut self, title: &str, labels: &[String], body_file: &Path) -> Result<String>;

    /// Translate an issue number into the tracker's internal id.
    fn issue_id(&mut self, number: &IssueRef) -> Result<String>;

    /// Make `child_id` a sub-issue of `parent_id`.
    fn add_sub_issue(&mut self, parent_id: &str, child_id: &str) -> Result<()>;

    /// First project of the current repository, if any.
    fn first_project(&mut self) -> Result<Option<ProjectHandle>>;

    /// Add an issue to a project.
    fn add_to_project(&mut self, project_id: &str, issue_id: &str) -> Result<()>;
}
