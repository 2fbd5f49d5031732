pub mod activity;
pub mod aggregate;
pub mod commit;
pub mod exec;
pub mod fetch;
pub mod output;

pub use activity::{contribution_data, contribution_weeks, group_by_day};
pub use aggregate::{aggregate, current_streak, level_for_count, window_dates, MAX_LEVEL, MAX_WINDOW_DAYS};
pub use commit::exec_commits;
pub use exec::{exec, HeatArgs};
pub use fetch::{fetch_window, fetch_window_detailed, fetch_with_progress, window_start, DETAIL_LIMIT, PER_PAGE};
pub use output::{output_commits, output_heatmap, output_json, output_ndjson, render_grid};
