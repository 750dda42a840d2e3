//! In-memory port implementations shared by the unit tests of this crate.

#![cfg(test)]
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use pipeline::{
    CommentRecord, CommitRecord, CommitSha, PullRequestNumber, PullRequestSource,
    PullRequestSummary, ReleaseRecord, ReleaseRecordSink, RemoteError, RetryPolicy,
};

fn unavailable(operation: &str) -> RemoteError {
    RemoteError::Status {
        operation: operation.to_string(),
        status: 502,
        message: "simulated outage".to_string(),
        retry: RetryPolicy::NonRetryable,
    }
}

/// Scripted [`PullRequestSource`].
#[derive(Default)]
pub struct FakeSource {
    pub titles: HashMap<u64, String>,
    pub commits: HashMap<u64, Vec<&'static str>>,
    pub associations: HashMap<&'static str, Vec<u64>>,
    pub comments: HashMap<u64, Vec<CommentRecord>>,
    pub failing_commits: HashSet<&'static str>,
    pub failing_comments: HashSet<u64>,
    pub fail_commit_listing: bool,
}

impl FakeSource {
    pub fn with_title(mut self, pr: u64, title: &str) -> Self {
        self.titles.insert(pr, title.to_string());
        self
    }

    pub fn with_commits(mut self, pr: u64, shas: &[&'static str]) -> Self {
        self.commits.insert(pr, shas.to_vec());
        self
    }

    pub fn associate(mut self, sha: &'static str, prs: &[u64]) -> Self {
        self.associations.insert(sha, prs.to_vec());
        self
    }

    pub fn comment(mut self, pr: u64, author: &str, body: &str) -> Self {
        self.comments.entry(pr).or_default().push(CommentRecord {
            author: author.to_string(),
            body: Some(body.to_string()),
        });
        self
    }

    pub fn fail_association(mut self, sha: &'static str) -> Self {
        self.failing_commits.insert(sha);
        self
    }

    pub fn fail_comments(mut self, pr: u64) -> Self {
        self.failing_comments.insert(pr);
        self
    }
}

pub fn commit_records(shas: &[&str]) -> Vec<CommitRecord> {
    shas.iter()
        .map(|sha| CommitRecord {
            sha: CommitSha::new(*sha).unwrap(),
        })
        .collect()
}

#[async_trait]
impl PullRequestSource for FakeSource {
    async fn pull_request(
        &self,
        number: PullRequestNumber,
    ) -> Result<PullRequestSummary, RemoteError> {
        self.titles
            .get(&number.as_u64())
            .map(|title| PullRequestSummary {
                number,
                title: title.clone(),
            })
            .ok_or_else(|| unavailable("get pull request"))
    }

    async fn commits(&self, number: PullRequestNumber) -> Result<Vec<CommitRecord>, RemoteError> {
        if self.fail_commit_listing {
            return Err(unavailable("list pull request commits"));
        }
        let shas = self.commits.get(&number.as_u64()).cloned().unwrap_or_default();
        Ok(commit_records(&shas))
    }

    async fn pull_requests_for_commit(
        &self,
        sha: &CommitSha,
    ) -> Result<Vec<PullRequestNumber>, RemoteError> {
        if self.failing_commits.contains(sha.as_str()) {
            return Err(unavailable("list pull requests for commit"));
        }
        Ok(self
            .associations
            .get(sha.as_str())
            .map(|prs| prs.iter().copied().map(PullRequestNumber::new).collect())
            .unwrap_or_default())
    }

    async fn comments(&self, number: PullRequestNumber) -> Result<Vec<CommentRecord>, RemoteError> {
        if self.failing_comments.contains(&number.as_u64()) {
            return Err(unavailable("list pull request comments"));
        }
        Ok(self.comments.get(&number.as_u64()).cloned().unwrap_or_default())
    }
}

/// [`ReleaseRecordSink`] that remembers every record and can reject chosen tickets.
#[derive(Default)]
pub struct RecordingSink {
    pub records: Mutex<Vec<ReleaseRecord>>,
    pub reject_tickets: HashSet<&'static str>,
}

impl RecordingSink {
    pub fn rejecting(tickets: &[&'static str]) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            reject_tickets: tickets.iter().copied().collect(),
        }
    }

    pub fn written(&self) -> Vec<ReleaseRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn written_ids(&self) -> Vec<String> {
        self.written()
            .into_iter()
            .map(|r| r.ticket_id.as_str().to_string())
            .collect()
    }
}

#[async_trait]
impl ReleaseRecordSink for RecordingSink {
    async fn create_record(&self, record: &ReleaseRecord) -> Result<(), RemoteError> {
        if self.reject_tickets.contains(record.ticket_id.as_str()) {
            return Err(unavailable("create page"));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
