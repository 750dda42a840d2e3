//! GitHub REST client implementing [`PullRequestSource`].

use std::time::Duration;

use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::{Octocrab, Page};
use pipeline::{
    retry_remote, CommentRecord, CommitRecord, CommitSha, PullRequestNumber, PullRequestSource,
    PullRequestSummary, RemoteError, RepositoryId, RetrySettings,
};
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::errors::GithubError;
use crate::models::{
    AssociatedPullResponse, CommitResponse, IssueCommentResponse, PullRequestResponse,
};

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PAGE_SIZE: u8 = 100;

/// Connection settings for [`GithubClient`].
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// REST root, e.g. `https://api.github.com` or a GHES `/api/v3` root.
    pub api_url: String,
    /// Personal or workflow token.
    pub token: String,
    /// Repository every call is scoped to.
    pub repository: RepositoryId,
    /// Connect and read timeout per request.
    pub timeout: Duration,
    /// Attempt budget and back-off for retryable failures.
    pub retry: RetrySettings,
}

impl GithubConfig {
    /// Settings with the default endpoint, a 30s timeout, and 3 attempts.
    pub fn new(token: impl Into<String>, repository: RepositoryId) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            repository,
            timeout: Duration::from_secs(30),
            retry: RetrySettings::default(),
        }
    }
}

/// Read-only GitHub client scoped to one repository.
#[derive(Clone)]
pub struct GithubClient {
    octocrab: Octocrab,
    config: GithubConfig,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_url", &self.config.api_url)
            .field("repository", &self.config.repository)
            .finish_non_exhaustive()
    }
}

impl GithubClient {
    /// Builds the octocrab instance. Must be called inside a Tokio runtime.
    pub fn new(config: GithubConfig) -> Result<Self, GithubError> {
        // Attempts are counted by `retry_remote`, so octocrab's own layer is off.
        let octocrab = Octocrab::builder()
            .base_uri(config.api_url.as_str())
            .map_err(GithubError::Client)?
            .personal_token(config.token.clone())
            .add_retry_config(RetryConfig::None)
            .set_connect_timeout(Some(config.timeout))
            .set_read_timeout(Some(config.timeout))
            .build()
            .map_err(GithubError::Client)?;
        Ok(Self { octocrab, config })
    }

    fn route(&self, path: &str) -> String {
        format!(
            "/repos/{}/{}/{}",
            self.config.repository.owner(),
            self.config.repository.name(),
            path
        )
    }

    /// Fetches one resource.
    async fn get_one<T>(&self, operation: &'static str, route: &str) -> Result<T, RemoteError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let octocrab = &self.octocrab;
        retry_remote(self.config.retry, operation, move || async move {
            octocrab
                .get::<T, _, ()>(route, None)
                .await
                .map_err(|err| RemoteError::from(GithubError::from_octocrab(operation, err)))
        })
        .await
    }

    /// Fetches every page of a list endpoint.
    ///
    /// A retryable failure on any page restarts the listing from the first page.
    async fn get_all<T>(&self, operation: &'static str, route: &str) -> Result<Vec<T>, RemoteError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let octocrab = &self.octocrab;
        retry_remote(self.config.retry, operation, move || async move {
            let first: Page<T> = octocrab
                .get(route, Some(&[("per_page", PAGE_SIZE)]))
                .await
                .map_err(|err| RemoteError::from(GithubError::from_octocrab(operation, err)))?;
            octocrab
                .all_pages(first)
                .await
                .map_err(|err| RemoteError::from(GithubError::from_octocrab(operation, err)))
        })
        .await
    }
}

#[async_trait]
impl PullRequestSource for GithubClient {
    #[instrument(skip(self), fields(pr = %number))]
    async fn pull_request(
        &self,
        number: PullRequestNumber,
    ) -> Result<PullRequestSummary, RemoteError> {
        let pr: PullRequestResponse = self
            .get_one("get pull request", &self.route(&format!("pulls/{number}")))
            .await?;
        Ok(pr.into())
    }

    #[instrument(skip(self), fields(pr = %number))]
    async fn commits(&self, number: PullRequestNumber) -> Result<Vec<CommitRecord>, RemoteError> {
        let commits: Vec<CommitResponse> = self
            .get_all(
                "list pull request commits",
                &self.route(&format!("pulls/{number}/commits")),
            )
            .await?;
        Ok(commits.into_iter().filter_map(CommitResponse::into_record).collect())
    }

    #[instrument(skip(self, sha), fields(sha = %sha))]
    async fn pull_requests_for_commit(
        &self,
        sha: &CommitSha,
    ) -> Result<Vec<PullRequestNumber>, RemoteError> {
        let pulls: Vec<AssociatedPullResponse> = self
            .get_all(
                "list pull requests for commit",
                &self.route(&format!("commits/{sha}/pulls")),
            )
            .await?;
        Ok(pulls
            .into_iter()
            .map(|p| PullRequestNumber::new(p.number))
            .collect())
    }

    #[instrument(skip(self), fields(pr = %number))]
    async fn comments(&self, number: PullRequestNumber) -> Result<Vec<CommentRecord>, RemoteError> {
        let comments: Vec<IssueCommentResponse> = self
            .get_all(
                "list pull request comments",
                &self.route(&format!("issues/{number}/comments")),
            )
            .await?;
        Ok(comments.into_iter().map(CommentRecord::from).collect())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
