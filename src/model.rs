use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FolioError;
use crate::util::{short_sha, subject_line};

pub const SCHEMA_VERSION: u32 = 1;

/// Change status of a file inside a commit, as GitHub reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    Copied,
    Changed,
    Unchanged,
}

impl FileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Removed => "removed",
            FileStatus::Renamed => "renamed",
            FileStatus::Copied => "copied",
            FileStatus::Changed => "changed",
            FileStatus::Unchanged => "unchanged",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            FileStatus::Added => '+',
            FileStatus::Modified => '~',
            FileStatus::Removed => '-',
            _ => '•',
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileStatus {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "added" => Ok(FileStatus::Added),
            "modified" => Ok(FileStatus::Modified),
            "removed" | "deleted" => Ok(FileStatus::Removed),
            "renamed" => Ok(FileStatus::Renamed),
            "copied" => Ok(FileStatus::Copied),
            "changed" => Ok(FileStatus::Changed),
            "unchanged" => Ok(FileStatus::Unchanged),
            other => Err(FolioError::Parse(format!("Unknown file status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChange {
    pub path: String,
    pub status: FileStatus,
    pub additions: u32,
    pub deletions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub sha: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub files: Vec<FileChange>,
}

impl Commit {
    pub fn new(
        sha: impl Into<String>,
        author: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            sha: sha.into(),
            author: author.into(),
            email: None,
            message: message.into(),
            timestamp,
            files: Vec::new(),
        }
    }

    pub fn with_files(mut self, files: Vec<FileChange>) -> Self {
        self.files = files;
        self
    }

    pub fn subject(&self) -> &str {
        subject_line(&self.message)
    }

    pub fn additions(&self) -> u64 {
        self.files.iter().map(|f| f.additions as u64).sum()
    }

    pub fn deletions(&self) -> u64 {
        self.files.iter().map(|f| f.deletions as u64).sum()
    }

    pub fn summary(&self) -> CommitSummary {
        CommitSummary {
            sha: short_sha(&self.sha),
            message: self.message.clone(),
            author: self.author.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub message: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub count: u32,
    pub commits: Vec<CommitSummary>,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStats {
    pub total_commits: usize,
    pub days_with_commits: usize,
    pub current_streak: u32,
    #[serde(serialize_with = "serialize_average")]
    pub average_commits_per_day: f64,
}

// Zero is written as an integer, never as `0.0`.
fn serialize_average<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if *value == 0.0 {
        serializer.serialize_u64(0)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub days: Vec<DayBucket>,
    pub stats: ActivityStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub window_days: u32,
    pub days: Vec<DayBucket>,
    pub stats: ActivityStats,
}

/// Commits sharing a UTC calendar day, with file and line totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayActivity {
    pub date: NaiveDate,
    pub commits: Vec<Commit>,
    pub total_files: usize,
    pub total_additions: u64,
    pub total_deletions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::parse_timestamp;

    #[test]
    fn status_parses_github_values() {
        assert_eq!("added".parse::<FileStatus>().unwrap(), FileStatus::Added);
        assert_eq!("Deleted".parse::<FileStatus>().unwrap(), FileStatus::Removed);
        assert!("exploded".parse::<FileStatus>().is_err());
        assert_eq!(FileStatus::Renamed.to_string(), "renamed");
    }

    #[test]
    fn average_zero_serializes_as_integer() {
        let stats = ActivityStats {
            total_commits: 0,
            days_with_commits: 0,
            current_streak: 0,
            average_commits_per_day: 0.0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["averageCommitsPerDay"], serde_json::json!(0));
        assert!(json["averageCommitsPerDay"].is_u64());
    }

    #[test]
    fn commit_totals_and_summary() {
        let ts = parse_timestamp("2024-05-01T10:00:00Z").unwrap();
        let commit = Commit::new("abcdef0123456", "Ada", "Add docs\n\nbody", ts).with_files(vec![
            FileChange {
                path: "README.md".into(),
                status: FileStatus::Modified,
                additions: 3,
                deletions: 1,
                patch: None,
            },
            FileChange {
                path: "src/lib.rs".into(),
                status: FileStatus::Added,
                additions: 10,
                deletions: 0,
                patch: None,
            },
        ]);
        assert_eq!(commit.additions(), 13);
        assert_eq!(commit.deletions(), 1);
        assert_eq!(commit.subject(), "Add docs");
        assert_eq!(commit.summary().sha, "abcdef0");
    }
}
