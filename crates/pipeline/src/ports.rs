//! Port traits implemented by infrastructure crates.
//!
//! The orchestration layer (`nodes`) only ever talks to these traits. The
//! `github` crate implements [`PullRequestSource`], the `notion` crate
//! implements [`ReleaseRecordSink`], and tests supply in-memory fakes.
//!
//! All source methods are read-only, so callers may invoke them concurrently.

use async_trait::async_trait;

use crate::{
    CommentRecord, CommitRecord, CommitSha, PullRequestNumber, PullRequestSummary, ReleaseRecord,
    RemoteError, Timestamp,
};

/// Read-only access to pull requests, their commits, and their comments.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Fetches a single pull request.
    async fn pull_request(
        &self,
        number: PullRequestNumber,
    ) -> Result<PullRequestSummary, RemoteError>;

    /// Lists every commit of a pull request, in the order the host returns them.
    async fn commits(&self, number: PullRequestNumber) -> Result<Vec<CommitRecord>, RemoteError>;

    /// Lists the pull requests the host associates with a commit.
    ///
    /// May be empty (direct pushes) or contain several entries (cherry-picks).
    async fn pull_requests_for_commit(
        &self,
        sha: &CommitSha,
    ) -> Result<Vec<PullRequestNumber>, RemoteError>;

    /// Lists every comment on a pull request in creation order.
    async fn comments(&self, number: PullRequestNumber) -> Result<Vec<CommentRecord>, RemoteError>;
}

/// Write-only access to the release document database.
#[async_trait]
pub trait ReleaseRecordSink: Send + Sync {
    /// Creates one record. There is no update or delete path.
    async fn create_record(&self, record: &ReleaseRecord) -> Result<(), RemoteError>;
}

/// Source of the current time.
///
/// Injected wherever "today" matters so tests can pin the clock.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> Timestamp;
}

/// [`Clock`] backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// [`Clock`] that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
