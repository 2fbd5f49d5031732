pub mod client;
pub mod config;
pub mod types;

pub use client::{last_page, GithubClient, RepoProbe};
pub use config::{GithubConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use types::{commits_from_json, ApiCommit, ApiFile, ApiRepository, ApiStats};
