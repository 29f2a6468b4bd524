//! Shared test infrastructure for task2issue integration tests.
//!
//! Provides a recording FakeTracker and a TestEnv holding a folder of task files.

#![allow(dead_code)]

use eyre::{Result, bail};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use task2issue::{IssueRef, ProjectHandle, RunConfig, Tracker};
use tempfile::TempDir;

/// One recorded tracker call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateIssue {
        title: String,
        labels: Vec<String>,
        body: String,
    },
    IssueId(String),
    AddSubIssue {
        parent_id: String,
        child_id: String,
    },
    FirstProject,
    AddToProject {
        project_id: String,
        issue_id: String,
    },
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::CreateIssue { .. } | Call::AddSubIssue { .. } | Call::AddToProject { .. }
        )
    }
}

/// In-memory tracker that records every call.
///
/// Issues are numbered from 100 upwards in creation order; the internal id
/// of issue N is "I_N".
#[derive(Debug, Default)]
pub struct FakeTracker {
    pub calls: Vec<Call>,
    /// Body files handed to create_issue, to check cleanup
    pub body_files: Vec<PathBuf>,
    pub created: u64,
    pub fail_create_titles: HashSet<String>,
    pub unknown_issues: HashSet<String>,
    pub fail_sub_issue: bool,
    pub fail_add_to_project: bool,
    pub fail_project_lookup: bool,
    pub urls_without_number: bool,
    pub project: Option<ProjectHandle>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, id: &str, title: &str) -> Self {
        self.project = Some(ProjectHandle {
            id: id.to_string(),
            title: title.to_string(),
        });
        self
    }

    pub fn failing_create(mut self, title: &str) -> Self {
        self.fail_create_titles.insert(title.to_string());
        self
    }

    pub fn unknown_issue(mut self, number: &str) -> Self {
        self.unknown_issues.insert(number.to_string());
        self
    }

    /// Titles of created issues, in call order.
    pub fn created_titles(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::CreateIssue { title, .. } => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn mutation_count(&self) -> usize {
        self.calls.iter().filter(|c| c.is_mutation()).count()
    }

    pub fn sub_issue_calls(&self) -> Vec<(String, String)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::AddSubIssue { parent_id, child_id } => Some((parent_id.clone(), child_id.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Tracker for FakeTracker {
    fn create_issue(&mut self, title: &str, labels: &[String], body_file: &Path) -> Result<String> {
        let body = fs::read_to_string(body_file)?;
        self.body_files.push(body_file.to_path_buf());
        self.calls.push(Call::CreateIssue {
            title: title.to_string(),
            labels: labels.to_vec(),
            body,
        });

        if self.fail_create_titles.contains(title) {
            bail!("could not add label: 'missing' not found");
        }

        let number = 100 + self.created;
        self.created += 1;
        if self.urls_without_number {
            Ok(format!("https://github.com/acme/widgets/pull/{}", number))
        } else {
            Ok(format!("https://github.com/acme/widgets/issues/{}", number))
        }
    }

    fn issue_id(&mut self, number: &IssueRef) -> Result<String> {
        self.calls.push(Call::IssueId(number.as_str().to_string()));
        if self.unknown_issues.contains(number.as_str()) {
            bail!("Could not resolve to an issue with the number of {}", number.as_str());
        }
        Ok(format!("I_{}", number.as_str()))
    }

    fn add_sub_issue(&mut self, parent_id: &str, child_id: &str) -> Result<()> {
        self.calls.push(Call::AddSubIssue {
            parent_id: parent_id.to_string(),
            child_id: child_id.to_string(),
        });
        if self.fail_sub_issue {
            bail!("GraphQL error: sub-issue limit reached");
        }
        Ok(())
    }

    fn first_project(&mut self) -> Result<Option<ProjectHandle>> {
        self.calls.push(Call::FirstProject);
        if self.fail_project_lookup {
            bail!("gh: Resource not accessible by integration");
        }
        Ok(self.project.clone())
    }

    fn add_to_project(&mut self, project_id: &str, issue_id: &str) -> Result<()> {
        self.calls.push(Call::AddToProject {
            project_id: project_id.to_string(),
            issue_id: issue_id.to_string(),
        });
        if self.fail_add_to_project {
            bail!("project is closed");
        }
        Ok(())
    }
}

/// Test environment with a temporary folder of task files.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub tracker: FakeTracker,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_tracker(FakeTracker::new())
    }

    pub fn with_tracker(tracker: FakeTracker) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, tracker }
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a task file and return its path.
    pub fn write_task(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir().join(name);
        fs::write(&path, content).expect("Failed to write task file");
        path
    }

    /// Live-run config for this folder with project attachment off.
    pub fn config(&self) -> RunConfig {
        RunConfig::new(self.dir()).attach_project(false)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
