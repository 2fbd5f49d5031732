use crate::model::{Commit, DayActivity};
use crate::util::{day_key, day_string};
use chrono::{Days, NaiveDate};
use std::collections::{BTreeMap, HashMap};

/// Groups commits by UTC day, newest day first. Commits keep their input
/// order inside a day.
pub fn group_by_day(commits: &[Commit]) -> Vec<DayActivity> {
    let mut day_map: HashMap<NaiveDate, DayActivity> = HashMap::new();

    for commit in commits {
        let date = day_key(&commit.timestamp);
        let entry = day_map.entry(date).or_insert_with(|| DayActivity {
            date,
            commits: Vec::new(),
            total_files: 0,
            total_additions: 0,
            total_deletions: 0,
        });
        entry.total_files += commit.files.len();
        entry.total_additions += commit.additions();
        entry.total_deletions += commit.deletions();
        entry.commits.push(commit.clone());
    }

    let mut days: Vec<DayActivity> = day_map.into_values().collect();
    days.sort_by(|a, b| b.date.cmp(&a.date));
    days
}

/// Commit count per `YYYY-MM-DD`.
pub fn contribution_data(commits: &[Commit]) -> BTreeMap<String, u32> {
    let mut data = BTreeMap::new();
    for commit in commits {
        *data.entry(day_string(day_key(&commit.timestamp))).or_insert(0) += 1;
    }
    data
}

/// Columns of seven days covering the `days` days before `today`, oldest
/// column first. Used for the compact contribution grid.
pub fn contribution_weeks(days: u32, today: NaiveDate) -> Vec<Vec<NaiveDate>> {
    let week_count = days.div_ceil(7);
    let mut weeks = Vec::with_capacity(week_count as usize);

    for week in 0..week_count {
        let column: Vec<NaiveDate> = (0..7u32)
            .filter_map(|day| {
                let back = days as i64 - (week * 7 + day) as i64;
                if back >= 0 {
                    today.checked_sub_days(Days::new(back as u64))
                } else {
                    today.checked_add_days(Days::new(back.unsigned_abs()))
                }
            })
            .collect();
        weeks.push(column);
    }

    weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileChange, FileStatus};
    use crate::util::parse_timestamp;
    use pretty_assertions::assert_eq;

    fn commit(sha: &str, ts: &str, additions: u32, deletions: u32) -> Commit {
        Commit::new(sha, "Ada", "msg", parse_timestamp(ts).unwrap()).with_files(vec![FileChange {
            path: format!("{sha}.txt"),
            status: FileStatus::Modified,
            additions,
            deletions,
            patch: None,
        }])
    }

    #[test]
    fn groups_newest_day_first_with_totals() {
        let commits = vec![
            commit("c", "2024-06-15T09:00:00Z", 5, 1),
            commit("b", "2024-06-14T20:00:00Z", 2, 2),
            commit("a", "2024-06-14T08:00:00Z", 1, 0),
        ];
        let days = group_by_day(&commits);
        assert_eq!(days.len(), 2);
        assert_eq!(day_string(days[0].date), "2024-06-15");
        assert_eq!(days[1].total_files, 2);
        assert_eq!(days[1].total_additions, 3);
        assert_eq!(days[1].total_deletions, 2);
        let shas: Vec<&str> = days[1].commits.iter().map(|c| c.sha.as_str()).collect();
        assert_eq!(shas, vec!["b", "a"]);
    }

    #[test]
    fn contribution_data_counts_per_day() {
        let commits = vec![
            commit("a", "2024-06-15T09:00:00Z", 0, 0),
            commit("b", "2024-06-15T23:59:59Z", 0, 0),
            commit("c", "2024-06-01T00:00:00Z", 0, 0),
        ];
        let data = contribution_data(&commits);
        assert_eq!(data.get("2024-06-15"), Some(&2));
        assert_eq!(data.get("2024-06-01"), Some(&1));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn twelve_week_grid() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let weeks = contribution_weeks(84, today);
        assert_eq!(weeks.len(), 12);
        assert!(weeks.iter().all(|w| w.len() == 7));
        assert_eq!(weeks[0][0], NaiveDate::from_ymd_opt(2024, 3, 23).unwrap());
        assert_eq!(weeks[11][6], NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
    }
}
