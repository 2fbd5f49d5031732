use crate::cli::CommonArgs;
use crate::github::{commits_from_json, GithubClient};
use crate::model::Commit;
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;
use super::{aggregate, fetch_with_progress, output_heatmap, output_json, output_ndjson};

pub struct HeatArgs {
    pub days: u32,
    pub input: Option<PathBuf>,
    pub json: bool,
    pub ndjson: bool,
    pub watch: Option<Duration>,
}

enum CommitSource {
    File(PathBuf),
    Github(GithubClient),
}

impl CommitSource {
    fn label(&self) -> anyhow::Result<String> {
        match self {
            CommitSource::File(path) => Ok(path.display().to_string()),
            CommitSource::Github(client) => client
                .config()
                .repo_path()
                .context("Set --owner and --repo (or GITHUB_OWNER / GITHUB_REPO)"),
        }
    }

    async fn load(&self, days: u32, now: DateTime<Utc>, progress: bool) -> anyhow::Result<Vec<Commit>> {
        match self {
            CommitSource::File(path) => load_input(path),
            CommitSource::Github(client) => fetch_with_progress(client, days, now, false, progress)
                .await
                .context("Failed to fetch commits from GitHub"),
        }
    }
}

fn load_input(path: &Path) -> anyhow::Result<Vec<Commit>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    commits_from_json(&raw).with_context(|| format!("Failed to parse commits from {}", path.display()))
}

pub async fn exec(common: CommonArgs, args: HeatArgs) -> anyhow::Result<()> {
    let source = match args.input {
        Some(path) => CommitSource::File(path),
        None => CommitSource::Github(
            GithubClient::new(common.github_config()).context("Failed to build GitHub client")?,
        ),
    };
    let label = source.label()?;
    let machine_output = args.json || args.ndjson;

    loop {
        let now = Utc::now();
        let commits = source.load(args.days, now, !machine_output).await?;
        let heatmap = aggregate(&commits, args.days, now);

        if args.json {
            output_json(&heatmap, &label, args.days)?;
        } else if args.ndjson {
            output_ndjson(&heatmap)?;
        } else {
            output_heatmap(&heatmap, &label)?;
        }

        let Some(interval) = args.watch else {
            return Ok(());
        };
        tracing::debug!(?interval, "Waiting for next refresh");
        tokio::time::sleep(interval).await;
        if !machine_output {
            let _ = console::Term::stdout().clear_screen();
        }
    }
}
