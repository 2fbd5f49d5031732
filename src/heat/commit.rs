use crate::cli::CommonArgs;
use crate::github::GithubClient;
use crate::heat::{fetch_with_progress, group_by_day, output_commits};
use anyhow::Context;
use chrono::Utc;

/// `commits` subcommand: recent commits with file totals, grouped by day.
pub async fn exec_commits(common: CommonArgs, days: u32, json: bool) -> anyhow::Result<()> {
    let client = GithubClient::new(common.github_config()).context("Failed to build GitHub client")?;
    client
        .config()
        .repo_path()
        .context("Set --owner and --repo (or GITHUB_OWNER / GITHUB_REPO)")?;

    let commits = fetch_with_progress(&client, days, Utc::now(), true, !json)
        .await
        .context("Failed to fetch commits from GitHub")?;
    let grouped = group_by_day(&commits);

    if json {
        let output = serde_json::json!({
            "commitsByDate": grouped,
            "totalCommits": commits.len(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        output_commits(&grouped)?;
    }

    Ok(())
}
