//! Core data types for task documents and the issues created from them.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A single frontmatter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Plain `key: value` entry, one layer of quotes removed
    Text(String),

    /// Bracketed `key: [a, b]` entry, empty items dropped
    List(Vec<String>),
}

impl FieldValue {
    /// Returns the text value, or None for lists.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    /// Normalize to a list: a non-empty string becomes a single item.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) if s.is_empty() => Vec::new(),
            FieldValue::Text(s) => vec![s.clone()],
            FieldValue::List(items) => items.clone(),
        }
    }
}

/// Metadata block of a task document.
pub type Frontmatter = BTreeMap<String, FieldValue>;

/// Canonical issue number, e.g. "12".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueRef(String);

impl IssueRef {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Normalized view of one task document.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSpec {
    /// Declared title, None when missing or empty
    pub title: Option<String>,

    /// Labels, always a list (possibly empty)
    pub labels: Vec<String>,

    /// Canonicalized parent reference
    pub parent: Option<IssueRef>,

    /// Document body with frontmatter stripped
    pub body: String,
}

/// An issue the tracker accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedIssue {
    /// URL printed by the tracker
    pub url: String,

    /// Number taken from a trailing `/issues/<n>` segment of the URL
    pub number: Option<IssueRef>,
}

/// Destination project, resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectHandle {
    /// Tracker-internal node id
    pub id: String,

    /// Human-readable project title
    pub title: String,
}

/// Result of an optional follow-up step (project attachment, parent link).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Step did not apply to this file
    Skipped,
    Done,
    Failed,
}

impl StepOutcome {
    pub fn from_success(ok: bool) -> Self {
        if ok { StepOutcome::Done } else { StepOutcome::Failed }
    }
}

/// What happened to one task file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    /// Source document
    pub path: PathBuf,

    /// Title the issue was (or would have been) created with
    pub title: String,

    /// Created issue, None when creation failed
    pub created: Option<CreatedIssue>,

    /// Project attachment result
    pub project: StepOutcome,

    /// Parent link result
    pub parent: StepOutcome,
}

impl FileOutcome {
    /// A file succeeds iff its issue was created.
    pub fn succeeded(&self) -> bool {
        self.created.is_some()
    }
}
