//! Tracker implementation backed by the GitHub CLI (`gh`).

use crate::config::GhConfig;
use crate::tracker::{Tracker, TrackerError};
use crate::types::{IssueRef, ProjectHandle};
use eyre::{Context, Result};
use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::process::Command;

const ADD_SUB_ISSUE: &str = "mutation($parent: ID!, $child: ID!) {
  addSubIssue(input: {issueId: $parent, subIssueId: $child}) { issue { id } }
}";

const FIRST_PROJECT: &str = "query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) { projectsV2(first: 1) { nodes { id title } } }
}";

const ADD_PROJECT_ITEM: &str = "mutation($project: ID!, $content: ID!) {
  addProjectV2ItemById(input: {projectId: $project, contentId: $content}) { item { id } }
}";

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct IssueView {
    id: String,
}

#[derive(Debug, Deserialize)]
struct RepoView {
    owner: RepoOwner,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RepoOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct ProjectsData {
    repository: Option<RepositoryProjects>,
}

#[derive(Debug, Deserialize)]
struct RepositoryProjects {
    #[serde(rename = "projectsV2")]
    projects: Nodes<ProjectNode>,
}

#[derive(Debug, Deserialize)]
struct Nodes<T> {
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ProjectNode {
    id: String,
    title: String,
}

/// Tracker that shells out to `gh`.
pub struct GhCli {
    config: GhConfig,
}

impl GhCli {
    pub fn new(config: GhConfig) -> Self {
        Self { config }
    }

    /// Run `gh` with the given arguments and return its stdout.
    fn run(&self, args: &[&str]) -> Result<String> {
        let program = self.config.program.display().to_string();
        let command = format!("{} {}", program, args.iter().take(2).copied().collect::<Vec<_>>().join(" "));
        debug!("Running: {} ({} args)", command, args.len());

        let output = Command::new(&self.config.program)
            .args(args)
            .output()
            .map_err(|e| TrackerError::Spawn {
                program,
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(TrackerError::CommandFailed {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a GraphQL document through `gh api graphql`.
    fn graphql<T: DeserializeOwned>(&self, query: &str, variables: &[(&str, &str)]) -> Result<T> {
        let query_arg = format!("query={}", query);
        let variable_args: Vec<String> = variables.iter().map(|(k, v)| format!("{}={}", k, v)).collect();

        let mut args = vec!["api", "graphql", "-H", "GraphQL-Features: sub_issues", "-f", query_arg.as_str()];
        for arg in &variable_args {
            args.push("-f");
            args.push(arg);
        }

        let stdout = self.run(&args)?;
        decode_graphql(&stdout)
    }

    /// Append `--repo` when a repository is configured.
    fn with_repo<'a>(&'a self, args: &mut Vec<&'a str>) {
        if let Some(repo) = &self.config.repo {
            args.push("--repo");
            args.push(repo);
        }
    }

    fn current_repo(&self) -> Result<RepoView> {
        let mut args = vec!["repo", "view"];
        if let Some(repo) = &self.config.repo {
            args.push(repo);
        }
        args.extend(["--json", "owner,name"]);

        let stdout = self.run(&args).map_err(|e| e.wrap_err(TrackerError::NoRepository))?;
        serde_json::from_str(&stdout).map_err(|_| TrackerError::UnexpectedOutput(stdout).into())
    }
}

impl Tracker for GhCli {
    fn create_issue(&mut self, title: &str, labels: &[String], body_file: &Path) -> Result<String> {
        let body_path = body_file.display().to_string();
        let mut args = vec!["issue", "create", "--title", title, "--body-file", body_path.as_str()];
        for label in labels {
            args.push("--label");
            args.push(label);
        }
        self.with_repo(&mut args);

        let stdout = self.run(&args)?;
        created_url(&stdout).ok_or_else(|| TrackerError::UnexpectedOutput(stdout.clone()).into())
    }

    fn issue_id(&mut self, number: &IssueRef) -> Result<String> {
        let mut args = vec!["issue", "view", number.as_str(), "--json", "id"];
        self.with_repo(&mut args);

        let stdout = self.run(&args)?;
        let view: IssueView =
            serde_json::from_str(&stdout).with_context(|| format!("Failed to decode issue view for {}", number))?;
        Ok(view.id)
    }

    fn add_sub_issue(&mut self, parent_id: &str, child_id: &str) -> Result<()> {
        let _: serde_json::Value = self.graphql(ADD_SUB_ISSUE, &[("parent", parent_id), ("child", child_id)])?;
        Ok(())
    }

    fn first_project(&mut self) -> Result<Option<ProjectHandle>> {
        let repo = self.current_repo()?;
        let variables = [("owner", repo.owner.login.as_str()), ("name", repo.name.as_str())];
        let data: ProjectsData = self.graphql(FIRST_PROJECT, &variables)?;
        Ok(first_project_of(data))
    }

    fn add_to_project(&mut self, project_id: &str, issue_id: &str) -> Result<()> {
        let _: serde_json::Value =
            self.graphql(ADD_PROJECT_ITEM, &[("project", project_id), ("content", issue_id)])?;
        Ok(())
    }
}

/// The URL `gh issue create` prints on its last non-empty line.
fn created_url(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(String::from)
}

fn decode_graphql<T: DeserializeOwned>(stdout: &str) -> Result<T> {
    let response: GraphQlResponse<T> =
        serde_json::from_str(stdout).map_err(|_| TrackerError::UnexpectedOutput(stdout.to_string()))?;

    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(TrackerError::GraphQl(messages.join("; ")).into());
    }

    response
        .data
        .ok_or_else(|| TrackerError::UnexpectedOutput(stdout.to_string()).into())
}

fn first_project_of(data: ProjectsData) -> Option<ProjectHandle> {
    data.repository?
        .projects
        .nodes
        .into_iter()
        .next()
        .map(|node| ProjectHandle {
            id: node.id,
            title: node.title,
        })
}
