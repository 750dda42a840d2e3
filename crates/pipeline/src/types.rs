//! Shared value types for the release automation domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types group
//! several values together and are the units that flow between pipeline
//! stages. All of them are write-once: built by one stage, read by the next.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    CommitSha, ProjectName, PullRequestNumber, RepositoryId, TicketId, TicketUrl,
};

// ---------------------------------------------------------------------------
// Source records
// ---------------------------------------------------------------------------

/// A single comment on a pull request, as returned by the comment source.
///
/// Read once and discarded after URL extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Login of the comment author.
    pub author: String,
    /// Comment body. GitHub returns `null` for some bot-edited comments.
    pub body: Option<String>,
}

/// The fields of a pull request the pipelines care about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// Repository-scoped number.
    pub number: PullRequestNumber,
    /// Title, e.g. `"Release 2025-01-30"`.
    pub title: String,
}

/// A commit belonging to the release pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit SHA.
    pub sha: CommitSha,
}

// ---------------------------------------------------------------------------
// Traversal output
// ---------------------------------------------------------------------------

/// The ticket URLs found in one associated pull request's bot comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestTickets {
    /// The associated pull request.
    pub pull_request: PullRequestNumber,
    /// URLs in comment order, then document order within each comment.
    pub urls: Vec<TicketUrl>,
}

/// Ordered mapping from associated pull request to its ticket URLs.
///
/// Entries are kept in discovery order and each pull request appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketMap {
    entries: Vec<PullRequestTickets>,
}

impl TicketMap {
    /// Creates a map from entries already in discovery order.
    ///
    /// Later duplicates of a pull request number are merged into the first
    /// entry so the key set stays unique.
    pub fn from_entries(entries: impl IntoIterator<Item = PullRequestTickets>) -> Self {
        let mut map = TicketMap::default();
        for entry in entries {
            match map
                .entries
                .iter_mut()
                .find(|existing| existing.pull_request == entry.pull_request)
            {
                Some(existing) => existing.urls.extend(entry.urls),
                None => map.entries.push(entry),
            }
        }
        map
    }

    /// Returns the entries in discovery order.
    pub fn entries(&self) -> &[PullRequestTickets] {
        &self.entries
    }

    /// Returns the URLs recorded for `pull_request`, if it was seen.
    pub fn get(&self, pull_request: PullRequestNumber) -> Option<&[TicketUrl]> {
        self.entries
            .iter()
            .find(|e| e.pull_request == pull_request)
            .map(|e| e.urls.as_slice())
    }

    /// Number of distinct pull requests in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no associated pull request was found.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of (pull request, URL) pairs.
    pub fn url_count(&self) -> usize {
        self.entries.iter().map(|e| e.urls.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Release records
// ---------------------------------------------------------------------------

/// A release date in `YYYY-MM-DD` form.
///
/// Taken verbatim from the release pull request title when available, so the
/// content is not re-validated; the fallback path always produces a real date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseDate(String);

impl ReleaseDate {
    /// Creates a release date from raw text, returning `None` if it is blank.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Formats a calendar date as `YYYY-MM-DD`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    /// Returns the date string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row written to the document database per (pull request, ticket URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRecord {
    /// The contributing pull request.
    pub pull_request: PullRequestNumber,
    /// Back-reference to the contributing pull request's web page.
    pub pull_request_url: String,
    /// The ticket link as found in the bot comment.
    pub ticket_url: TicketUrl,
    /// Identifier resolved from `ticket_url`.
    pub ticket_id: TicketId,
    /// Date the release ships.
    pub release_date: ReleaseDate,
    /// Repository name.
    pub project: ProjectName,
}

/// Builds `https://<host>/<owner>/<repo>/pull/<number>`.
///
/// `server_url` is the web root of the host (e.g. `https://github.com`); a
/// trailing slash is tolerated.
pub fn pull_request_url(
    server_url: &str,
    repository: &RepositoryId,
    number: PullRequestNumber,
) -> String {
    format!(
        "{}/{}/{}/pull/{}",
        server_url.trim_end_matches('/'),
        repository.owner(),
        repository.name(),
        number
    )
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Outcome counts of one changelog run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Records accepted by the document database.
    pub written: usize,
    /// URLs skipped because no ticket identifier could be resolved.
    pub skipped: usize,
    /// Records the document database rejected or never received.
    pub failed: usize,
}

impl RunReport {
    /// A run succeeds when every attempted write succeeded.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Returns the UTC calendar date.
    pub fn date(self) -> NaiveDate {
        self.0.date_naive()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
