//! task2issue: turn a folder of task documents into GitHub issues.
//!
//! Each `TASK-???.md` file in a folder becomes one issue. An optional
//! frontmatter block supplies the title, labels and a parent issue; the
//! rest of the document becomes the issue body.
//!
//! # Example
//!
//! ```no_run
//! use task2issue::{GhCli, GhConfig, RunConfig, run};
//!
//! let mut tracker = GhCli::new(GhConfig::new());
//! let config = RunConfig::new("docs/tasks").attach_project(false);
//!
//! let outcome = run(&config, &mut tracker).unwrap();
//! assert!(outcome.is_success());
//! ```

mod types;

pub mod batch;
pub mod config;
pub mod frontmatter;
pub mod gh;
pub mod hierarchy;
pub mod locator;
pub mod pipeline;
pub mod preview;
pub mod tracker;

// Re-export public API
pub use batch::{BatchSummary, RunOutcome, resolve_project, run, run_batch};
pub use config::{GhConfig, RunConfig};
pub use gh::GhCli;
pub use hierarchy::{canonicalize_ref, issue_number_from_url, link_parent};
pub use locator::find_task_files;
pub use pipeline::process_task_file;
pub use preview::PreviewEntry;
pub use tracker::{Tracker, TrackerError};
pub use types::{CreatedIssue, FieldValue, FileOutcome, Frontmatter, IssueRef, ProjectHandle, StepOutcome, TaskSpec};
