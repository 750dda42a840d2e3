//! GitHub infrastructure adapter.
//!
//! Implements [`pipeline::PullRequestSource`] over the GitHub REST API using
//! `octocrab`.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules.
//! Authentication and `Link` pagination are delegated to octocrab. Retries on
//! rate limits and server errors go through [`pipeline::retry_remote`]. The
//! [`pipeline`] crate never sees octocrab types.
//!
//! ## Endpoints
//!
//! | Port method | Endpoint |
//! |-------------|----------|
//! | `pull_request` | `GET /repos/{owner}/{repo}/pulls/{number}` |
//! | `commits` | `GET /repos/{owner}/{repo}/pulls/{number}/commits` |
//! | `pull_requests_for_commit` | `GET /repos/{owner}/{repo}/commits/{sha}/pulls` |
//! | `comments` | `GET /repos/{owner}/{repo}/issues/{number}/comments` |

mod client;
mod errors;
mod models;

#[cfg(test)]
mod stub_server;

pub use client::{GithubClient, GithubConfig, DEFAULT_API_URL};
pub use errors::GithubError;
