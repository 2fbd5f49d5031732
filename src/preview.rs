use crate::cli::CommonArgs;
use crate::diff::{default_view, extract_content, parse_patch, DiffLineKind, ViewMode};
use crate::github::GithubClient;
use crate::model::{FileChange, FileStatus};
use anyhow::{anyhow, Context};
use console::style;
use std::io::Read;
use std::path::Path;

/// `extract` subcommand: patch from a file or stdin, rendered text to stdout.
pub fn exec_extract(status: FileStatus, patch: Option<&Path>) -> anyhow::Result<()> {
    let raw = match patch {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read patch from stdin")?;
            buf
        }
    };

    println!("{}", extract_content(&raw, status));
    Ok(())
}

/// `diff` subcommand: one file of one commit, previewed or as a diff.
pub async fn exec_diff(common: CommonArgs, commit: &str, file: &str, raw: bool) -> anyhow::Result<()> {
    let client = GithubClient::new(common.github_config()).context("Failed to build GitHub client")?;
    let detail = client
        .commit(commit)
        .await
        .with_context(|| format!("Failed to fetch commit {commit}"))?;

    let change: FileChange = detail
        .files
        .unwrap_or_default()
        .into_iter()
        .find(|f| f.filename == file)
        .map(FileChange::from)
        .ok_or_else(|| anyhow!("File {file} not found in commit {commit}"))?;

    println!(
        "{} {} {}",
        style(change.status.symbol()).bold(),
        style(&change.path).bold(),
        style(format!("+{} -{}", change.additions, change.deletions)).dim()
    );

    let Some(patch) = change.patch.as_deref() else {
        println!("File {}: {}\nNo diff available", change.status, change.path);
        return Ok(());
    };

    if !raw && default_view(&change.path) == ViewMode::Preview {
        println!("{}", extract_content(patch, change.status));
    } else {
        print_diff(patch);
    }
    Ok(())
}

fn print_diff(patch: &str) {
    for line in parse_patch(patch) {
        let number = style(format!("{:>4}", line.number)).dim();
        let text = match line.kind {
            DiffLineKind::Added => style(line.text).green(),
            DiffLineKind::Removed => style(line.text).red(),
            DiffLineKind::Metadata => style(line.text).cyan(),
            DiffLineKind::Context => style(line.text),
        };
        println!("{number} {text}");
    }
}
