//! Discovery of task documents.

use eyre::{Context, Result, bail};
use glob::Pattern;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};

/// File name pattern of task documents.
pub const TASK_FILE_PATTERN: &str = "TASK-???.md";

/// Find all task documents directly inside `dir`, sorted by file name.
///
/// Only file names are matched, so the directory path itself may be any
/// OS string.
pub fn find_task_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let pattern = Pattern::new(TASK_FILE_PATTERN).context("Invalid task file pattern")?;
    let entries = fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_name().to_str().is_some_and(|name| pattern.matches(name)))
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
