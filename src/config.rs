//! Run configuration.

use std::path::PathBuf;

/// Default name of the GitHub CLI executable.
const DEFAULT_GH_PROGRAM: &str = "gh";

/// Settings for the `gh` backed tracker.
#[derive(Debug, Clone)]
pub struct GhConfig {
    /// Executable to invoke
    pub program: PathBuf,

    /// `OWNER/NAME` passed as `--repo`; None lets gh infer it from the working directory
    pub repo: Option<String>,
}

impl GhConfig {
    /// Create config with default settings.
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_GH_PROGRAM),
            repo: None,
        }
    }

    /// Set the executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the target repository.
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }
}

impl Default for GhConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Folder containing TASK-???.md files
    pub target_dir: PathBuf,

    /// Preview only, no tracker calls
    pub dry_run: bool,

    /// Attach created issues to the repository's first project
    pub attach_project: bool,
}

impl RunConfig {
    /// Create config with default settings: live run, project attachment on.
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            dry_run: false,
            attach_project: true,
        }
    }

    /// Enable or disable preview mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enable or disable project attachment.
    pub fn attach_project(mut self, attach: bool) -> Self {
        self.attach_project = attach;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gh_config_defaults() {
        let config = GhConfig::default();
        assert_eq!(config.program, PathBuf::from("gh"));
        assert!(config.repo.is_none());
    }

    #[test]
    fn test_run_config_builder() {
        let config = RunConfig::new("tasks").dry_run(true).attach_project(false);
        assert_eq!(config.target_dir, PathBuf::from("tasks"));
        assert!(config.dry_run);
        assert!(!config.attach_project);
    }
}
