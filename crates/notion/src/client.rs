//! Notion pages client implementing [`ReleaseRecordSink`].

use std::time::Duration;

use async_trait::async_trait;
use pipeline::{
    retry_remote, DatabaseId, ReleaseRecord, ReleaseRecordSink, RemoteError, RetryPolicy,
    RetrySettings,
};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::instrument;

/// Public Notion REST root.
pub const DEFAULT_API_URL: &str = "https://api.notion.com/v1";

const NOTION_VERSION: &str = "2022-06-28";
const OPERATION: &str = "create release page";

#[derive(Debug, Error)]
pub enum NotionError {
    #[error("Could not build Notion HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Connection settings for [`NotionClient`].
#[derive(Debug, Clone)]
pub struct NotionConfig {
    pub api_url: String,
    /// Integration token sent as `Authorization: Bearer`.
    pub token: String,
    /// Database every page is created in.
    pub database_id: DatabaseId,
    pub timeout: Duration,
    /// Attempt budget for rate-limited (429) and 5xx responses.
    pub retry: RetrySettings,
}

impl NotionConfig {
    pub fn new(token: impl Into<String>, database_id: DatabaseId) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            database_id,
            timeout: Duration::from_secs(30),
            retry: RetrySettings::default(),
        }
    }
}

/// Error body Notion returns on non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Write-only Notion client.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    config: NotionConfig,
}

impl NotionClient {
    pub fn new(config: NotionConfig) -> Result<Self, NotionError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("release-tools/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(NotionError::Client)?;
        Ok(Self { http, config })
    }
}

/// Builds the `POST /v1/pages` body for `record`.
pub fn page_request(database_id: &DatabaseId, record: &ReleaseRecord) -> Value {
    json!({
        "parent": { "database_id": database_id.as_str() },
        "properties": {
            "Linear Ticket": {
                "title": [{ "text": { "content": record.ticket_id.as_str() } }]
            },
            "Ticket URL": { "url": record.ticket_url.as_str() },
            "Release Date": { "date": { "start": record.release_date.as_str() } },
            "Pull Request": { "url": record.pull_request_url },
            "Project": {
                "rich_text": [{ "text": { "content": record.project.as_str() } }]
            }
        }
    })
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            code: Some(code),
            message: Some(message),
        }) => format!("{code}: {message}"),
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ => body.to_string(),
    }
}

impl NotionClient {
    /// One `POST /pages` attempt.
    async fn post_page(&self, url: &str, body: &Value) -> Result<(), RemoteError> {
        let transport = |source: reqwest::Error| RemoteError::Transport {
            operation: OPERATION.to_string(),
            message: source.to_string(),
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let text = response.text().await.map_err(transport)?;
        Err(RemoteError::Status {
            operation: OPERATION.to_string(),
            status: status.as_u16(),
            message: error_message(&text),
            retry: RetryPolicy::for_status(status.as_u16(), retry_after),
        })
    }
}

#[async_trait]
impl ReleaseRecordSink for NotionClient {
    #[instrument(skip_all, fields(ticket_id = %record.ticket_id, pr = %record.pull_request))]
    async fn create_record(&self, record: &ReleaseRecord) -> Result<(), RemoteError> {
        let url = format!("{}/pages", self.config.api_url.trim_end_matches('/'));
        let body = page_request(&self.config.database_id, record);
        let (url, body) = (url.as_str(), &body);
        retry_remote(self.config.retry, OPERATION, move || self.post_page(url, body)).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
