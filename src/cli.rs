use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::github::{GithubClient, GithubConfig, DEFAULT_API_URL};
use crate::heat::{HeatArgs, MAX_WINDOW_DAYS};
use crate::model::FileStatus;

#[derive(Parser)]
#[command(name = "gitfolio")]
#[command(about = "Commit activity heatmaps, streaks and diff previews from the GitHub API")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, env = "GITHUB_OWNER", global = true, help = "Repository owner")]
    pub owner: Option<String>,

    #[arg(long, env = "GITHUB_REPO", global = true, help = "Repository name")]
    pub repo: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true, help = "GitHub API token")]
    pub token: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", global = true, default_value = DEFAULT_API_URL, help = "GitHub API base URL")]
    pub api_url: String,

    #[arg(
        long,
        env = "GITHUB_TIMEOUT",
        global = true,
        default_value = "10s",
        value_parser = humantime::parse_duration,
        help = "HTTP timeout for GitHub requests (e.g. 10s, 1m)"
    )]
    pub timeout: Duration,
}

impl CommonArgs {
    pub fn github_config(&self) -> GithubConfig {
        GithubConfig::default()
            .with_repository(self.owner.clone(), self.repo.clone())
            .with_token(self.token.clone())
            .with_api_url(self.api_url.clone())
            .with_timeout(self.timeout)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the activity JSON routes under /api/git
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000", help = "Address to listen on")]
        bind: SocketAddr,
    },
    /// Daily commit heatmap with streak statistics
    Heat {
        #[arg(long, default_value_t = 365, value_parser = window_days, help = "Trailing window in days")]
        days: u32,

        #[arg(long, help = "Read a GitHub commit-list JSON file instead of calling the API")]
        input: Option<PathBuf>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long, value_parser = humantime::parse_duration, help = "Refresh on an interval (e.g. 5m)")]
        watch: Option<Duration>,
    },
    /// Recent commits grouped by day
    Commits {
        #[arg(long, default_value_t = 30, value_parser = window_days, help = "Trailing window in days")]
        days: u32,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Rebuild file content from a unified diff
    Extract {
        #[arg(long, default_value = "modified", value_parser = parse_status, help = "File status: added, modified or removed")]
        status: FileStatus,

        #[arg(help = "Patch file (reads stdin when omitted)")]
        patch: Option<PathBuf>,
    },
    /// Show one file of a commit, Markdown as a preview
    Diff {
        #[arg(long, help = "Commit SHA")]
        commit: String,

        #[arg(long, help = "File path inside the commit")]
        file: String,

        #[arg(long, help = "Always print the raw diff")]
        raw: bool,
    },
}

fn parse_status(s: &str) -> std::result::Result<FileStatus, String> {
    s.parse().map_err(|e: crate::error::FolioError| e.to_string())
}

fn window_days(s: &str) -> std::result::Result<u32, String> {
    let days: u32 = s.parse().map_err(|e| format!("{e}"))?;
    if days > MAX_WINDOW_DAYS {
        return Err(format!("must be at most {MAX_WINDOW_DAYS}"));
    }
    Ok(days)
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind } => {
                let config = self.common.github_config();
                if !config.is_complete() {
                    tracing::warn!("GitHub owner/repo not set; routes will report missing configuration");
                }
                let client = GithubClient::new(config).context("Failed to build GitHub client")?;
                crate::server::serve(bind, crate::server::AppState::new(client)).await
            }
            Commands::Heat { days, input, json, ndjson, watch } => {
                crate::heat::exec(self.common, HeatArgs { days, input, json, ndjson, watch }).await
            }
            Commands::Commits { days, json } => {
                crate::heat::exec_commits(self.common, days, json).await
            }
            Commands::Extract { status, patch } => {
                crate::preview::exec_extract(status, patch.as_deref())
            }
            Commands::Diff { commit, file, raw } => {
                crate::preview::exec_diff(self.common, &commit, &file, raw).await
            }
        }
    }
}
