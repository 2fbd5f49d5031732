use crate::error::Result;
use crate::github::GithubClient;
use crate::model::Commit;
use chrono::{DateTime, Days, TimeZone, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// GitHub's page size ceiling; only one page is ever requested.
pub const PER_PAGE: u32 = 100;
/// Commits whose file lists are fetched for the day-grouped view.
pub const DETAIL_LIMIT: usize = 50;

/// Start of the first UTC day of a `window_days` window ending at `now`.
pub fn window_start(now: DateTime<Utc>, window_days: u32) -> DateTime<Utc> {
    now.date_naive()
        .checked_sub_days(Days::new(window_days as u64))
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Commits in the window, newest first, without file lists.
pub async fn fetch_window(
    client: &GithubClient,
    window_days: u32,
    now: DateTime<Utc>,
) -> Result<Vec<Commit>> {
    let since = window_start(now, window_days);
    let commits: Vec<Commit> = client
        .list_commits(Some(since), PER_PAGE)
        .await?
        .into_iter()
        .map(Commit::from)
        .collect();
    info!(count = commits.len(), window_days, "Fetched commit window");
    Ok(commits)
}

/// Commits in the window with file changes and patches for the newest
/// [`DETAIL_LIMIT`].
pub async fn fetch_window_detailed(
    client: &GithubClient,
    window_days: u32,
    now: DateTime<Utc>,
) -> Result<Vec<Commit>> {
    let listed = fetch_window(client, window_days, now).await?;
    let shas: Vec<&str> = listed
        .iter()
        .take(DETAIL_LIMIT)
        .map(|c| c.sha.as_str())
        .collect();
    Ok(client.commit_details(&shas).await)
}

/// [`fetch_window`] or [`fetch_window_detailed`] behind a terminal spinner.
pub async fn fetch_with_progress(
    client: &GithubClient,
    window_days: u32,
    now: DateTime<Utc>,
    detailed: bool,
    show_progress: bool,
) -> Result<Vec<Commit>> {
    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb.set_message("Fetching commits from GitHub...");
        pb
    } else {
        ProgressBar::hidden()
    };

    let result = if detailed {
        fetch_window_detailed(client, window_days, now).await
    } else {
        fetch_window(client, window_days, now).await
    };

    match &result {
        Ok(commits) => pb.finish_with_message(format!("{} commits fetched", commits.len())),
        Err(_) => pb.finish_and_clear(),
    }
    result
}
