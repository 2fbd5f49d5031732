use crate::model::{DayActivity, DayBucket, Heatmap, HeatOutput, SCHEMA_VERSION};
use crate::util::day_string;
use anyhow::Result;
use chrono::{Datelike, Utc};
use console::style;

pub fn output_json(heatmap: &Heatmap, source: &str, window_days: u32) -> Result<()> {
    let output = HeatOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        source: source.to_string(),
        window_days,
        days: heatmap.days.clone(),
        stats: heatmap.stats.clone(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(heatmap: &Heatmap) -> Result<()> {
    for bucket in &heatmap.days {
        println!("{}", serde_json::to_string(bucket)?);
    }
    Ok(())
}

fn level_cell(level: u8) -> console::StyledObject<&'static str> {
    match level {
        0 => style("·").dim(),
        1 => style("▪").green().dim(),
        2 => style("▪").green(),
        3 => style("■").green(),
        _ => style("■").green().bold(),
    }
}

/// Rows are weekdays (Monday first), columns are weeks, oldest on the left.
pub fn render_grid(days: &[DayBucket]) -> Vec<String> {
    let Some(first) = days.first() else {
        return Vec::new();
    };

    let lead = first.date.weekday().num_days_from_monday() as usize;
    let columns = (lead + days.len()).div_ceil(7);
    let mut rows = vec![String::new(); 7];

    for col in 0..columns {
        for (weekday, row) in rows.iter_mut().enumerate() {
            let slot = col * 7 + weekday;
            let cell = if slot < lead {
                " ".to_string()
            } else {
                match days.get(slot - lead) {
                    Some(day) => level_cell(day.level).to_string(),
                    None => " ".to_string(),
                }
            };
            row.push_str(&cell);
            row.push(' ');
        }
    }

    rows.into_iter().map(|r| r.trim_end().to_string()).collect()
}

pub fn output_heatmap(heatmap: &Heatmap, source: &str) -> Result<()> {
    let (Some(first), Some(last)) = (heatmap.days.first(), heatmap.days.last()) else {
        println!("No data to display");
        return Ok(());
    };

    println!("{} {}", style("Commit Activity").bold(), style(source).dim());
    println!(
        "{}",
        style(format!("{} to {}", day_string(first.date), day_string(last.date))).dim()
    );
    println!("{}", "─".repeat(50));

    const LABELS: [&str; 7] = ["Mon", "   ", "Wed", "   ", "Fri", "   ", "Sun"];
    for (label, row) in LABELS.iter().zip(render_grid(&heatmap.days)) {
        println!("{label} {row}");
    }

    let stats = &heatmap.stats;
    println!();
    println!("Total commits:      {}", style(stats.total_commits).cyan());
    println!("Days with commits:  {}", style(stats.days_with_commits).cyan());
    println!("Current streak:     {}", style(format!("{} days", stats.current_streak)).green());
    println!("Average per day:    {}", style(format!("{:.1}", stats.average_commits_per_day)).yellow());

    println!("\n{}", style("Legend").bold());
    let legend: Vec<String> = (0..=4u8).map(|l| level_cell(l).to_string()).collect();
    println!("  Less {} More", legend.join(" "));

    Ok(())
}

pub fn output_commits(days: &[DayActivity]) -> Result<()> {
    if days.is_empty() {
        println!("No commits in this window");
        return Ok(());
    }

    for (idx, day) in days.iter().enumerate() {
        println!(
            "{} {}  {} files  {} {}",
            style(format!("#{}", days.len() - idx)).dim(),
            style(day_string(day.date)).bold(),
            day.total_files,
            style(format!("+{}", day.total_additions)).green(),
            style(format!("-{}", day.total_deletions)).red(),
        );
        for commit in &day.commits {
            println!(
                "    {} {} {}",
                style(crate::util::short_sha(&commit.sha)).yellow(),
                commit.subject(),
                style(format!("({})", commit.author)).dim()
            );
        }
    }
    Ok(())
}
