use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{info, warn};

use super::error::{ApiError, ApiResult};
use super::AppState;
use crate::diff::{build_file_tree, default_view, extract_content, parse_patch, DiffLine, TreeNode, ViewMode};
use crate::github::ApiStats;
use crate::heat::{
    aggregate, contribution_data, current_streak, fetch_window, fetch_window_detailed, group_by_day,
    MAX_WINDOW_DAYS,
};
use crate::model::{ActivityStats, Commit, DayActivity, DayBucket, FileChange, FileStatus};
use crate::util::{day_key, language_for_path, short_sha};

pub const HEATMAP_DAYS: u32 = 365;
pub const COMMITS_DAYS: u32 = 30;
pub const STATS_DAYS: u32 = 90;
const TREE_COMMITS: u32 = 10;
const MISSING_CONFIG: &str = "Missing GitHub configuration";

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub days: Option<u32>,
}

impl WindowQuery {
    fn days_or(&self, default: u32) -> u32 {
        self.days.unwrap_or(default).min(MAX_WINDOW_DAYS)
    }
}

// ===== /heatmap =====

#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub days: Vec<DayBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ActivityStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HeatmapResponse {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            days: Vec::new(),
            stats: None,
            error: Some(error.into()),
        }
    }
}

pub async fn heatmap(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Json<HeatmapResponse> {
    if !state.client.config().is_complete() {
        return Json(HeatmapResponse::failed(MISSING_CONFIG));
    }

    let window = query.days_or(HEATMAP_DAYS);
    let now = Utc::now();
    match fetch_window(&state.client, window, now).await {
        Ok(commits) => {
            let heat = aggregate(&commits, window, now);
            Json(HeatmapResponse {
                days: heat.days,
                stats: Some(heat.stats),
                error: None,
            })
        }
        Err(e) => {
            warn!(error = %e, "Heatmap fetch failed");
            Json(HeatmapResponse::failed(e.to_string()))
        }
    }
}

// ===== /commits =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitsResponse {
    pub commits_by_date: Vec<DayActivity>,
    pub total_commits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn commits(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Json<CommitsResponse> {
    let window = query.days_or(COMMITS_DAYS);
    match fetch_window_detailed(&state.client, window, Utc::now()).await {
        Ok(commits) => {
            info!(count = commits.len(), "Serving day-grouped commits");
            Json(CommitsResponse {
                commits_by_date: group_by_day(&commits),
                total_commits: commits.len(),
                error: None,
            })
        }
        Err(e) => {
            warn!(error = %e, "Commit list fetch failed");
            Json(CommitsResponse {
                commits_by_date: Vec::new(),
                total_commits: 0,
                error: Some(e.to_string()),
            })
        }
    }
}

// ===== /commit/{sha} =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileView {
    pub path: String,
    pub status: FileStatus,
    pub additions: u32,
    pub deletions: u32,
    pub language: &'static str,
    pub view_mode: ViewMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

impl From<&FileChange> for FileView {
    fn from(file: &FileChange) -> Self {
        let view_mode = default_view(&file.path);
        let preview = match (view_mode, file.patch.as_deref()) {
            (ViewMode::Preview, Some(patch)) => Some(extract_content(patch, file.status)),
            _ => None,
        };
        FileView {
            path: file.path.clone(),
            status: file.status,
            additions: file.additions,
            deletions: file.deletions,
            language: language_for_path(&file.path),
            view_mode,
            patch: file.patch.clone(),
            preview,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDetailResponse {
    pub sha: String,
    pub full_sha: String,
    pub message: String,
    pub author: String,
    pub date: chrono::DateTime<Utc>,
    pub files: Vec<FileView>,
    pub stats: ApiStats,
    pub tree: Vec<TreeNode>,
}

fn stats_for(commit: &Commit) -> ApiStats {
    let additions = commit.additions();
    let deletions = commit.deletions();
    ApiStats {
        additions,
        deletions,
        total: additions + deletions,
    }
}

pub async fn commit_detail(
    State(state): State<Arc<AppState>>,
    Path(sha): Path<String>,
) -> ApiResult<Json<CommitDetailResponse>> {
    let api = state.client.commit(&sha).await?;
    let stats = api.stats.clone();
    let commit = Commit::from(api);

    Ok(Json(CommitDetailResponse {
        sha: short_sha(&commit.sha),
        files: commit.files.iter().map(FileView::from).collect(),
        tree: build_file_tree(&commit.files),
        stats: stats.unwrap_or_else(|| stats_for(&commit)),
        full_sha: commit.sha,
        message: commit.message,
        author: commit.author,
        date: commit.timestamp,
    }))
}

// ===== /diff =====

#[derive(Debug, Deserialize)]
pub struct DiffQuery {
    pub file: Option<String>,
    pub commit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DiffResponse {
    pub diff: String,
    pub filename: String,
    pub status: FileStatus,
    pub lines: Vec<DiffLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

pub async fn diff(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DiffQuery>,
) -> ApiResult<Json<DiffResponse>> {
    let filename = query
        .file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| ApiError::bad_request("Filename required"))?;
    let sha = query
        .commit
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::bad_request("Commit hash required"))?;

    let commit = Commit::from(state.client.commit(&sha).await?);
    let file = commit
        .files
        .into_iter()
        .find(|f| f.path == filename)
        .ok_or_else(|| ApiError::not_found("File not found in commit"))?;

    let preview = match (default_view(&file.path), file.patch.as_deref()) {
        (ViewMode::Preview, Some(patch)) => Some(extract_content(patch, file.status)),
        _ => None,
    };
    let diff = file
        .patch
        .unwrap_or_else(|| format!("File {}: {}\nNo diff available", file.status, filename));

    Ok(Json(DiffResponse {
        lines: parse_patch(&diff),
        diff,
        filename,
        status: file.status,
        preview,
    }))
}

// ===== /stats =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_commits: u64,
    pub total_files: u64,
    pub streak: u32,
    pub contribution_data: BTreeMap<String, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatsResponse {
    fn degraded(total_files: u64, error: impl Into<String>) -> Self {
        Self {
            total_commits: 0,
            total_files,
            streak: 0,
            contribution_data: BTreeMap::new(),
            error: Some(error.into()),
        }
    }
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let client = &state.client;
    let repo = match client.repository().await {
        Ok(repo) => repo,
        Err(e) => {
            warn!(error = %e, "Repository lookup failed");
            return Json(StatsResponse::degraded(0, e.to_string()));
        }
    };

    let now = Utc::now();
    let commits = match fetch_window(client, STATS_DAYS, now).await {
        Ok(commits) => commits,
        Err(e) => {
            warn!(error = %e, "Stats commit fetch failed");
            return Json(StatsResponse::degraded(repo.size, e.to_string()));
        }
    };

    let active: HashSet<_> = commits.iter().map(|c| day_key(&c.timestamp)).collect();
    let total_commits = client.total_commit_count().await.unwrap_or_else(|e| {
        warn!(error = %e, "Total commit count unavailable");
        0
    });

    Json(StatsResponse {
        total_commits,
        total_files: repo.size,
        streak: current_streak(&active, day_key(&now)),
        contribution_data: contribution_data(&commits),
        error: None,
    })
}

// ===== /status =====

#[derive(Debug, Serialize)]
pub struct StatusFile {
    pub filename: String,
    pub status: FileStatus,
    pub staged: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub has_changes: bool,
    pub files: Vec<StatusFile>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusResponse {
    fn unchanged(error: Option<String>) -> Self {
        Self {
            has_changes: false,
            files: Vec::new(),
            count: 0,
            note: None,
            error,
        }
    }
}

/// Today's work: the files of the latest commit when it was made today.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let latest = match state.client.list_commits(None, 1).await {
        Ok(list) => list.into_iter().next(),
        Err(e) => {
            warn!(error = %e, "Latest commit lookup failed");
            return Json(StatusResponse::unchanged(Some(e.to_string())));
        }
    };

    let Some(latest) = latest else {
        return Json(StatusResponse::unchanged(None));
    };
    if day_key(&latest.commit.author.date) != day_key(&Utc::now()) {
        return Json(StatusResponse::unchanged(None));
    }

    match state.client.commit(&latest.sha).await {
        Ok(detail) => {
            let files: Vec<StatusFile> = detail
                .files
                .unwrap_or_default()
                .into_iter()
                .map(|f| StatusFile {
                    filename: f.filename,
                    status: f.status,
                    staged: true,
                })
                .collect();
            Json(StatusResponse {
                has_changes: !files.is_empty(),
                count: files.len(),
                files,
                note: Some("Showing latest commit from today".to_string()),
                error: None,
            })
        }
        Err(e) => {
            warn!(error = %e, sha = %latest.sha, "Latest commit details failed");
            Json(StatusResponse::unchanged(None))
        }
    }
}

// ===== /tree =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeCommit {
    pub sha: String,
    pub message: String,
    pub author: String,
    pub date: chrono::DateTime<Utc>,
    pub iso_date: chrono::NaiveDate,
    pub files: Vec<FileChange>,
    pub stats: ApiStats,
}

#[derive(Debug, Serialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeResponse {
    pub commits: Vec<TreeCommit>,
    pub files: Vec<FileChange>,
    pub tree: Vec<TreeNode>,
    pub total_commits: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TreeResponse {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            commits: Vec::new(),
            files: Vec::new(),
            tree: Vec::new(),
            total_commits: 0,
            repository: None,
            error: Some(error.into()),
        }
    }
}

/// First occurrence of each path wins; patches are dropped.
pub fn unique_files(commits: &[Commit]) -> Vec<FileChange> {
    let mut seen = HashSet::new();
    commits
        .iter()
        .flat_map(|c| c.files.iter())
        .filter(|f| seen.insert(f.path.clone()))
        .map(|f| FileChange {
            patch: None,
            ..f.clone()
        })
        .collect()
}

pub async fn tree(State(state): State<Arc<AppState>>) -> Json<TreeResponse> {
    let config = state.client.config();
    let (Some(owner), Some(repo)) = (config.owner.clone(), config.repo.clone()) else {
        return Json(TreeResponse::failed(MISSING_CONFIG));
    };

    let listed = match state.client.list_commits(None, TREE_COMMITS).await {
        Ok(listed) => listed,
        Err(e) => {
            warn!(error = %e, "Tree commit list failed");
            return Json(TreeResponse::failed(e.to_string()));
        }
    };
    let shas: Vec<&str> = listed.iter().map(|c| c.sha.as_str()).collect();
    let detailed = state.client.commit_details(&shas).await;

    let files = unique_files(&detailed);
    let commits: Vec<TreeCommit> = detailed
        .iter()
        .map(|c| TreeCommit {
            sha: short_sha(&c.sha),
            message: c.message.clone(),
            author: c.author.clone(),
            date: c.timestamp,
            iso_date: day_key(&c.timestamp),
            files: c.files.clone(),
            stats: stats_for(c),
        })
        .collect();

    Json(TreeResponse {
        total_commits: commits.len(),
        tree: build_file_tree(&files),
        commits,
        files,
        repository: Some(RepositoryRef { owner, repo }),
        error: None,
    })
}

// ===== /check =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryInfo {
    pub name: String,
    pub full_name: String,
    pub private: bool,
    pub is_empty: bool,
    pub default_branch: String,
    pub has_issues: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInfo {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub has_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub repository: Option<RepositoryInfo>,
    pub error: Option<Value>,
    pub config: ConfigInfo,
}

pub async fn check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<CheckResponse>) {
    let config = state.client.config();
    let config_info = ConfigInfo {
        owner: config.owner.clone(),
        repo: config.repo.clone(),
        has_token: config.has_token(),
    };

    match state.client.probe_repository().await {
        Ok(probe) => {
            let ok = probe.repository.is_some();
            let repository = probe.repository.map(|r| RepositoryInfo {
                name: r.name,
                full_name: r.full_name,
                private: r.private,
                is_empty: r.size == 0,
                default_branch: r.default_branch,
                has_issues: r.has_issues,
            });
            (
                StatusCode::OK,
                Json(CheckResponse {
                    status: if ok { "success" } else { "error" },
                    status_code: Some(probe.status),
                    repository,
                    error: probe.error,
                    config: config_info,
                }),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(CheckResponse {
                status: "error",
                status_code: None,
                repository: None,
                error: Some(Value::String(e.to_string())),
                config: config_info,
            }),
        ),
    }
}
