use serde::{Deserialize, Serialize};

use super::extract::is_metadata;
use crate::util::is_markdown_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffLineKind {
    Added,
    Removed,
    Context,
    Metadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    pub number: usize,
    pub kind: DiffLineKind,
    pub text: String,
}

pub fn classify_line(line: &str) -> DiffLineKind {
    if is_metadata(line) {
        DiffLineKind::Metadata
    } else if line.starts_with('+') {
        DiffLineKind::Added
    } else if line.starts_with('-') {
        DiffLineKind::Removed
    } else {
        DiffLineKind::Context
    }
}

/// Splits a patch into numbered, classified lines. Text is kept verbatim.
pub fn parse_patch(patch: &str) -> Vec<DiffLine> {
    patch
        .lines()
        .enumerate()
        .map(|(idx, line)| DiffLine {
            number: idx + 1,
            kind: classify_line(line),
            text: line.to_string(),
        })
        .collect()
}

/// How a changed file is shown by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Preview,
    Diff,
}

pub fn default_view(path: &str) -> ViewMode {
    if is_markdown_path(path) {
        ViewMode::Preview
    } else {
        ViewMode::Diff
    }
}
