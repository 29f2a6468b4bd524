//! Parent/child linking between issues.

use crate::tracker::Tracker;
use crate::types::IssueRef;
use eyre::{Context, Result};
use log::{debug, warn};
use regex::Regex;
use std::sync::LazyLock;

/// `/issues/<n>` anywhere in a reference.
static ISSUE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/issues/(\d+)").expect("static regex is valid"));

/// `/issues/<n>` at the very end of a URL.
static TRAILING_ISSUE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/issues/(\d+)$").expect("static regex is valid"));

/// Canonicalize a parent reference: `12`, `#12` and an issue URL all become `12`.
pub fn canonicalize_ref(reference: &str) -> IssueRef {
    let reference = reference.trim();

    if let Some(number) = reference.strip_prefix('#') {
        return IssueRef::new(number);
    }

    if let Some(caps) = ISSUE_SEGMENT.captures(reference) {
        return IssueRef::new(&caps[1]);
    }

    IssueRef::new(reference)
}

/// Extract the issue number from a created-issue URL.
pub fn issue_number_from_url(url: &str) -> Option<IssueRef> {
    TRAILING_ISSUE_SEGMENT
        .captures(url.trim())
        .map(|caps| IssueRef::new(&caps[1]))
}

/// Make `child` a sub-issue of `parent`.
///
/// Both numbers are translated to tracker ids first; `child_id` skips the
/// child lookup when the caller already resolved it. Any failure is logged
/// and reported as `false`; the child issue is left in place.
pub fn link_parent(tracker: &mut dyn Tracker, parent: &IssueRef, child: &IssueRef, child_id: Option<&str>) -> bool {
    match try_link_parent(tracker, parent, child, child_id) {
        Ok(()) => {
            debug!("Linked {} as sub-issue of {}", child, parent);
            true
        }
        Err(e) => {
            warn!("Failed to link {} to parent {}: {:#}", child, parent, e);
            false
        }
    }
}

fn try_link_parent(
    tracker: &mut dyn Tracker,
    parent: &IssueRef,
    child: &IssueRef,
    child_id: Option<&str>,
) -> Result<()> {
    let parent_id = tracker
        .issue_id(parent)
        .with_context(|| format!("Failed to resolve parent issue {}", parent))?;
    let child_id = match child_id {
        Some(id) => id.to_string(),
        None => tracker
            .issue_id(child)
            .with_context(|| format!("Failed to resolve child issue {}", child))?,
    };

    tracker
        .add_sub_issue(&parent_id, &child_id)
        .context("Failed to add sub-issue relationship")
}
