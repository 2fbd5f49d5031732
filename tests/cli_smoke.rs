use assert_cmd::prelude::*;
use chrono::{Duration, SecondsFormat, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn gitfolio() -> Command {
    let mut cmd = Command::cargo_bin("gitfolio").unwrap();
    // Keep the developer's GitHub settings out of the tests.
    for var in ["GITHUB_OWNER", "GITHUB_REPO", "GITHUB_TOKEN", "GITHUB_API_URL", "GITHUB_TIMEOUT"] {
        cmd.env_remove(var);
    }
    cmd
}

/// Commit-list entry dated `days_ago` days before now. A UTC midnight
/// between building the input and running the binary shifts every entry one
/// bucket older, so assertions must hold under that shift.
fn api_commit(sha: &str, days_ago: i64, message: &str) -> serde_json::Value {
    let date = (Utc::now() - Duration::days(days_ago)).to_rfc3339_opts(SecondsFormat::Secs, true);
    serde_json::json!({
        "sha": sha,
        "commit": {
            "message": message,
            "author": {"name": "Ada Lovelace", "email": "ada@example.com", "date": date}
        }
    })
}

fn write_commits(dir: &Path, commits: &[serde_json::Value]) -> std::path::PathBuf {
    let path = dir.join("commits.json");
    let mut f = File::create(&path).unwrap();
    f.write_all(serde_json::to_string(commits).unwrap().as_bytes()).unwrap();
    path
}

#[test]
fn heat_json_from_input_file() {
    let dir = tempdir().unwrap();
    let input = write_commits(
        dir.path(),
        &[
            api_commit("c3c3c3c3c3", 0, "third"),
            api_commit("b2b2b2b2b2", 1, "second"),
            api_commit("a1a1a1a1a1", 1, "first"),
            api_commit("0000000000", 40, "old"),
        ],
    );

    let out = gitfolio()
        .args(["heat", "--json", "--days", "30", "--input"])
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();

    let days = v["days"].as_array().unwrap();
    assert_eq!(days.len(), 31);
    let in_window: u64 = days.iter().map(|d| d["count"].as_u64().unwrap()).sum();
    assert_eq!(in_window, 3);
    assert_eq!(v["stats"]["totalCommits"], 4);
    assert_eq!(v["stats"]["daysWithCommits"], 3);
    // Today empty after a rollover still starts the walk at yesterday.
    assert_eq!(v["stats"]["currentStreak"], 2);
    assert_eq!(v["windowDays"], 30);
    assert_eq!(v["version"], 1);
}

#[test]
fn heat_ndjson_emits_one_line_per_day() {
    let dir = tempdir().unwrap();
    let input = write_commits(dir.path(), &[api_commit("abcdef1234", 0, "today")]);

    let out = gitfolio()
        .args(["heat", "--ndjson", "--days", "6", "--input"])
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    let days: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(days.len(), 7);

    // The commit lands on today or, across a UTC midnight, on yesterday.
    let active: Vec<&serde_json::Value> = days.iter().filter(|d| d["count"] != 0).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["level"], 1);
    assert_eq!(active[0]["commits"][0]["sha"], "abcdef1");
    assert!(days[5]["count"] == 1 || days[6]["count"] == 1);
}

#[test]
fn heat_rejects_malformed_timestamps() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"[{"sha":"a","commit":{"message":"m","author":{"name":"n","date":"not a date"}}}]"#,
    )
    .unwrap();

    gitfolio()
        .args(["heat", "--json", "--input"])
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn heat_without_repository_fails() {
    gitfolio().args(["heat", "--json"]).assert().failure();
}

#[test]
fn extract_from_stdin() {
    let out = assert_cmd::Command::from_std(gitfolio())
        .args(["extract", "--status", "added"])
        .write_stdin("diff --git a/README.md b/README.md\n@@ -0,0 +1,4 @@\n+```markdown\n+# Title\n+Hello\n+```\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(String::from_utf8(out).unwrap(), "# Title\nHello\n");
}

#[test]
fn extract_from_file_modified() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("change.patch");
    std::fs::write(&path, "@@ -1,3 +1,3 @@\n # Notes\n-old\n+new\n").unwrap();

    let out = gitfolio()
        .arg("extract")
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(String::from_utf8(out).unwrap(), "# Notes\nnew\n");
}
