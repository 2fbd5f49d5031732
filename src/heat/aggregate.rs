use crate::model::{ActivityStats, Commit, CommitSummary, DayBucket, Heatmap};
use crate::util::day_key;
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::collections::{HashMap, HashSet};

/// Highest intensity level a day can reach.
pub const MAX_LEVEL: u8 = 4;
/// Largest window accepted from callers, about ten years of days.
pub const MAX_WINDOW_DAYS: u32 = 3660;

struct DayAccum {
    count: u32,
    commits: Vec<CommitSummary>,
}

/// Buckets `commits` into one entry per UTC day from `now - window_days` to
/// `now`, oldest first, and computes the summary stats.
pub fn aggregate(commits: &[Commit], window_days: u32, now: DateTime<Utc>) -> Heatmap {
    let mut day_map: HashMap<NaiveDate, DayAccum> = HashMap::new();

    for commit in commits {
        let entry = day_map
            .entry(day_key(&commit.timestamp))
            .or_insert_with(|| DayAccum {
                count: 0,
                commits: Vec::new(),
            });
        entry.count += 1;
        entry.commits.push(commit.summary());
    }

    let today = day_key(&now);
    let days = window_dates(today, window_days)
        .map(|date| match day_map.get(&date) {
            Some(accum) => DayBucket {
                date,
                count: accum.count,
                commits: accum.commits.clone(),
                level: level_for_count(accum.count),
            },
            None => DayBucket {
                date,
                count: 0,
                commits: Vec::new(),
                level: 0,
            },
        })
        .collect();

    let active: HashSet<NaiveDate> = day_map.keys().copied().collect();
    let total_commits = commits.len();
    let days_with_commits = active.len();

    let stats = ActivityStats {
        total_commits,
        days_with_commits,
        current_streak: current_streak(&active, today),
        average_commits_per_day: average_per_day(total_commits, days_with_commits),
    };

    Heatmap { days, stats }
}

/// Contiguous dates ending at `today`, oldest first, `window_days + 1` long.
pub fn window_dates(today: NaiveDate, window_days: u32) -> impl Iterator<Item = NaiveDate> {
    (0..=window_days)
        .rev()
        .filter_map(move |offset| today.checked_sub_days(Days::new(offset as u64)))
}

/// `ceil(count / 2)` capped at [`MAX_LEVEL`]; zero stays zero.
pub fn level_for_count(count: u32) -> u8 {
    if count == 0 {
        return 0;
    }
    count.div_ceil(2).min(MAX_LEVEL as u32) as u8
}

/// Consecutive active days walking back from `today`.
///
/// A streak is alive only when the most recent active day is today or
/// yesterday. When today is still empty the walk starts from yesterday, so
/// an unfinished day never breaks the count.
pub fn current_streak(active: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let Some(&latest) = active.iter().max() else {
        return 0;
    };

    let mut cursor = if latest == today {
        today
    } else if Some(latest) == today.pred_opt() {
        latest
    } else {
        return 0;
    };

    let mut streak = 0;
    while active.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

fn average_per_day(total_commits: usize, days_with_commits: usize) -> f64 {
    if days_with_commits == 0 {
        return 0.0;
    }
    let raw = total_commits as f64 / days_with_commits as f64;
    (raw * 10.0).round() / 10.0
}
