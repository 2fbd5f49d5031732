//! Connection settings for the GitHub REST API.

use std::fmt;
use std::time::Duration;

use crate::error::{FolioError, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct GithubConfig {
    pub owner: Option<String>,
    pub repo: Option<String>,
    token: Option<String>,
    api_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            owner: None,
            repo: None,
            token: None,
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GithubConfig {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            repo: Some(repo.into()),
            ..Self::default()
        }
    }

    pub fn with_repository(mut self, owner: Option<String>, repo: Option<String>) -> Self {
        self.owner = owner;
        self.repo = repo;
        self
    }

    /// Empty strings count as unset so blank environment variables behave
    /// like missing ones.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn is_complete(&self) -> bool {
        self.repo_path().is_ok()
    }

    /// `owner/repo`, or a configuration error naming what is missing.
    pub fn repo_path(&self) -> Result<String> {
        match (self.owner.as_deref(), self.repo.as_deref()) {
            (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
                Ok(format!("{owner}/{repo}"))
            }
            _ => Err(FolioError::Config(
                "Missing GitHub configuration (owner and repo are required)".to_string(),
            )),
        }
    }

    pub fn repo_url(&self) -> Result<String> {
        Ok(format!("{}/repos/{}", self.api_url, self.repo_path()?))
    }
}
