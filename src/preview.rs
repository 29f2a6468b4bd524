//! Dry-run preview of what a run would do.

use crate::frontmatter::parse_task;
use crate::pipeline::fallback_title;
use crate::types::TaskSpec;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Planned actions for one task document.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewEntry {
    pub path: PathBuf,
    /// Parsed task, None when the file could not be read
    pub task: Option<TaskSpec>,
    pub attach_project: bool,
}

impl PreviewEntry {
    /// Read and parse `path` without touching the tracker.
    pub fn load(path: &Path, attach_project: bool) -> Self {
        Self {
            path: path.to_path_buf(),
            task: fs::read_to_string(path).ok().map(|content| parse_task(&content)),
            attach_project,
        }
    }
}

impl fmt::Display for PreviewEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some(task) = &self.task else {
            return write!(f, "{}: unreadable, would fail", name);
        };

        let title = match &task.title {
            Some(title) => format!("'{}'", title),
            None => format!("'{}' (from filename)", fallback_title(&self.path)),
        };
        let parent = task
            .parent
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "none".to_string());

        write!(
            f,
            "{}: title={}, labels=[{}], parent={}",
            name,
            title,
            task.labels.join(", "),
            parent
        )?;
        if self.attach_project {
            write!(f, ", project=first repository project")?;
        }
        Ok(())
    }
}

/// Build the preview for a sorted list of task documents.
pub fn preview(files: &[PathBuf], attach_project: bool) -> Vec<PreviewEntry> {
    files.iter().map(|path| PreviewEntry::load(path, attach_project)).collect()
}
