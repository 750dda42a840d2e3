//! Wire shapes of the GitHub REST responses this adapter reads.
//!
//! Only the fields the pipeline uses are declared; serde ignores the rest.

use pipeline::{CommentRecord, CommitRecord, CommitSha, PullRequestNumber, PullRequestSummary};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestResponse {
    pub number: u64,
    pub title: String,
}

impl From<PullRequestResponse> for PullRequestSummary {
    fn from(pr: PullRequestResponse) -> Self {
        PullRequestSummary {
            number: PullRequestNumber::new(pr.number),
            title: pr.title,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitResponse {
    pub sha: String,
}

impl CommitResponse {
    pub fn into_record(self) -> Option<CommitRecord> {
        CommitSha::new(self.sha).map(|sha| CommitRecord { sha })
    }
}

/// Element of `GET /repos/{owner}/{repo}/commits/{sha}/pulls`.
#[derive(Debug, Deserialize)]
pub(crate) struct AssociatedPullResponse {
    pub number: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserResponse {
    pub login: String,
}

/// Element of `GET /repos/{owner}/{repo}/issues/{number}/comments`.
///
/// `user` is `null` for comments by deleted accounts ("ghost").
#[derive(Debug, Deserialize)]
pub(crate) struct IssueCommentResponse {
    pub user: Option<UserResponse>,
    pub body: Option<String>,
}

impl From<IssueCommentResponse> for CommentRecord {
    fn from(comment: IssueCommentResponse) -> Self {
        CommentRecord {
            author: comment.user.map(|u| u.login).unwrap_or_default(),
            body: comment.body,
        }
    }
}
