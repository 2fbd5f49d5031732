use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Commit, FileChange, FileStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRepository {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub default_branch: String,
    #[serde(default)]
    pub has_issues: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCommit {
    pub sha: String,
    pub commit: ApiCommitDetail,
    #[serde(default)]
    pub files: Option<Vec<ApiFile>>,
    #[serde(default)]
    pub stats: Option<ApiStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCommitDetail {
    pub message: String,
    pub author: ApiAuthor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAuthor {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiFile {
    pub filename: String,
    pub status: FileStatus,
    #[serde(default)]
    pub additions: u32,
    #[serde(default)]
    pub deletions: u32,
    #[serde(default)]
    pub patch: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiStats {
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}

impl From<ApiFile> for FileChange {
    fn from(file: ApiFile) -> Self {
        FileChange {
            path: file.filename,
            status: file.status,
            additions: file.additions,
            deletions: file.deletions,
            patch: file.patch,
        }
    }
}

impl From<ApiCommit> for Commit {
    fn from(api: ApiCommit) -> Self {
        Commit {
            sha: api.sha,
            author: api.commit.author.name,
            email: api.commit.author.email,
            message: api.commit.message,
            timestamp: api.commit.author.date,
            files: api
                .files
                .unwrap_or_default()
                .into_iter()
                .map(FileChange::from)
                .collect(),
        }
    }
}

/// Parses a commit list in GitHub's REST format, e.g. saved output of
/// `GET /repos/{owner}/{repo}/commits`.
pub fn commits_from_json(json: &str) -> crate::error::Result<Vec<Commit>> {
    let api: Vec<ApiCommit> = serde_json::from_str(json)?;
    Ok(api.into_iter().map(Commit::from).collect())
}
