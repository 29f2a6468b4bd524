//! Frontmatter parsing for task documents.
//!
//! The accepted grammar is deliberately small:
//!
//! ```text
//! ---
//! key: value
//! key: "quoted value"
//! key: [item, 'item', "item"]
//! ---
//! body...
//! ```
//!
//! One `key: value` per line, split at the first colon. Anything richer
//! (nesting, multi-line scalars) is not supported and parses as plain text.

use crate::hierarchy::canonicalize_ref;
use crate::types::{FieldValue, Frontmatter, TaskSpec};

/// Delimiter that opens and closes the metadata block.
pub const DELIMITER: &str = "---";

/// Split a document into frontmatter and body.
///
/// Never fails: a document without a leading delimiter, or with an
/// unterminated block, is returned whole as body with empty metadata.
pub fn parse(content: &str) -> (Frontmatter, String) {
    if !content.starts_with(DELIMITER) {
        return (Frontmatter::new(), content.to_string());
    }

    let parts: Vec<&str> = content.splitn(3, DELIMITER).collect();
    if parts.len() < 3 {
        return (Frontmatter::new(), content.to_string());
    }

    let metadata = parse_metadata(parts[1].trim());
    let body = parts[2].trim().to_string();
    (metadata, body)
}

/// Parse a task document into the normalized fields the pipeline uses.
pub fn parse_task(content: &str) -> TaskSpec {
    let (metadata, body) = parse(content);

    let title = metadata
        .get("title")
        .and_then(FieldValue::as_text)
        .filter(|t| !t.is_empty())
        .map(String::from);

    let labels = metadata.get("labels").map(FieldValue::to_list).unwrap_or_default();

    let parent = metadata
        .get("parent")
        .and_then(FieldValue::as_text)
        .filter(|p| !p.is_empty())
        .map(canonicalize_ref);

    TaskSpec {
        title,
        labels,
        parent,
        body,
    }
}

fn parse_metadata(text: &str) -> Frontmatter {
    let mut metadata = Frontmatter::new();

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        metadata.insert(key.trim().to_string(), parse_value(value.trim()));
    }

    metadata
}

fn parse_value(value: &str) -> FieldValue {
    match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        Some(inner) => FieldValue::List(
            inner
                .split(',')
                .map(|item| unquote(item.trim()).trim())
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect(),
        ),
        None => FieldValue::Text(unquote(value).to_string()),
    }
}

/// Strip one layer of matching single or double quotes.
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2
            && let Some(inner) = s.strip_prefix(quote).and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    s
}
