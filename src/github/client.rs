use chrono::{DateTime, SecondsFormat, Utc};
use futures::future::join_all;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::config::GithubConfig;
use super::types::{ApiCommit, ApiErrorBody, ApiRepository};
use crate::error::{FolioError, Result};
use crate::model::Commit;

const ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("gitfolio/", env!("CARGO_PKG_VERSION"));

/// Outcome of probing the repository endpoint, successful or not.
#[derive(Debug, Clone)]
pub struct RepoProbe {
    pub status: u16,
    pub repository: Option<ApiRepository>,
    pub error: Option<Value>,
}

/// Thin typed wrapper over the handful of GitHub endpoints the site needs.
/// Every call is a single GET; nothing is retried or cached.
#[derive(Clone, Debug)]
pub struct GithubClient {
    http: Client,
    config: GithubConfig,
}

impl GithubClient {
    pub fn new(config: GithubConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GithubConfig {
        &self.config
    }

    fn get(&self, url: &str) -> RequestBuilder {
        debug!(url, "GitHub request");
        let request = self.http.get(url).header(header::ACCEPT, ACCEPT);
        match self.config.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn repository(&self) -> Result<ApiRepository> {
        let url = self.config.repo_url()?;
        self.send_json(self.get(&url)).await
    }

    /// Like [`repository`](Self::repository) but keeps GitHub's error body
    /// instead of turning it into an error.
    pub async fn probe_repository(&self) -> Result<RepoProbe> {
        let url = self.config.repo_url()?;
        let response = self.get(&url).send().await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if status.is_success() {
            let repository = serde_json::from_value(body)?;
            Ok(RepoProbe {
                status: status.as_u16(),
                repository: Some(repository),
                error: None,
            })
        } else {
            Ok(RepoProbe {
                status: status.as_u16(),
                repository: None,
                error: Some(body),
            })
        }
    }

    /// One page of commits, newest first.
    pub async fn list_commits(
        &self,
        since: Option<DateTime<Utc>>,
        per_page: u32,
    ) -> Result<Vec<ApiCommit>> {
        let url = format!("{}/commits", self.config.repo_url()?);
        let mut query = vec![("per_page", per_page.to_string())];
        if let Some(since) = since {
            query.push(("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        self.send_json(self.get(&url).query(&query)).await
    }

    /// A single commit including its file list and patches.
    pub async fn commit(&self, sha: &str) -> Result<ApiCommit> {
        let url = format!("{}/commits/{}", self.config.repo_url()?, sha);
        self.send_json(self.get(&url)).await
    }

    /// Fetches details for every sha concurrently. Failed lookups are logged
    /// and dropped; order follows `shas`.
    pub async fn commit_details<S: AsRef<str>>(&self, shas: &[S]) -> Vec<Commit> {
        let lookups = shas.iter().map(|sha| self.commit(sha.as_ref()));
        join_all(lookups)
            .await
            .into_iter()
            .zip(shas)
            .filter_map(|(result, sha)| match result {
                Ok(detail) => Some(Commit::from(detail)),
                Err(e) => {
                    warn!(sha = sha.as_ref(), error = %e, "Dropping commit without details");
                    None
                }
            })
            .collect()
    }

    /// Total commits on the default branch, read from the `rel="last"` link
    /// of a one-per-page listing. Zero when GitHub sends no pagination.
    pub async fn total_commit_count(&self) -> Result<u64> {
        let url = format!("{}/commits", self.config.repo_url()?);
        let response = self.get(&url).query(&[("per_page", "1")]).send().await?;
        let response = ensure_success(response).await?;

        let count = response
            .headers()
            .get(header::LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(last_page)
            .unwrap_or(0);
        Ok(count)
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    Err(FolioError::github(status.as_u16(), error_message(status, &text)))
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string())
}

/// Page number of the `rel="last"` entry of a `Link` header.
pub fn last_page(link: &str) -> Option<u64> {
    link.split(',').find_map(|part| {
        let (target, rel) = part.split_once(';')?;
        if !rel.contains("rel=\"last\"") {
            return None;
        }
        let target = target.trim().trim_start_matches('<').trim_end_matches('>');
        let (_, query) = target.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "page")
            .and_then(|(_, value)| value.parse().ok())
    })
}
