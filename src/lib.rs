//! Commit activity for a portfolio site: daily heatmaps with streaks,
//! Markdown previews rebuilt from diffs, and a JSON proxy over the GitHub
//! REST API that serves both.

pub mod cli;
pub mod diff;
pub mod error;
pub mod github;
pub mod heat;
pub mod model;
pub mod preview;
pub mod server;
pub mod util;

pub use diff::extract_content;
pub use error::{FolioError, Result};
pub use heat::aggregate;
