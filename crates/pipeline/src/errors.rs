//! Error and retry-policy types for the release automation domain.
//!
//! [`ReleaseToolsError`] covers conditions that halt a pipeline run outright.
//! Everything else in this module is recovered locally by the caller:
//!
//! - [`RemoteError`] during traversal is logged and replaced by an empty result.
//! - [`MalformedUrlError`] turns into a skipped record with a warning.
//! - [`ManifestError`] is always fatal (the caller supplied invalid input).
//!
//! [`RetryPolicy`] is a cross-cutting concern: adapters classify every remote
//! failure, and [`crate::retry::retry_remote`] reads that classification
//! through [`RemoteError::retry_policy`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry and, if so, after what delay.
///
/// - `Retryable` errors: timeouts, connection resets, 429 and 5xx responses.
/// - `NonRetryable` errors: authentication failures, missing resources,
///   malformed responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    Retryable {
        /// Minimum back-off before the next attempt, usually taken from a
        /// `Retry-After` header. `None` means apply the caller's own schedule.
        after: Option<Duration>,
    },
    /// The operation must not be retried.
    NonRetryable,
}

impl RetryPolicy {
    /// Classifies an HTTP status code.
    pub fn for_status(status: u16, retry_after: Option<Duration>) -> Self {
        match status {
            429 | 500..=599 => RetryPolicy::Retryable { after: retry_after },
            _ => RetryPolicy::NonRetryable,
        }
    }

    /// Returns `true` for [`RetryPolicy::Retryable`].
    pub fn is_retryable(&self) -> bool {
        matches!(self, RetryPolicy::Retryable { .. })
    }
}

// ---------------------------------------------------------------------------
// Remote call errors (port level)
// ---------------------------------------------------------------------------

/// A failed call through one of the port traits in [`crate::ports`].
///
/// Adapters convert their transport-specific errors into this type so the
/// orchestration layer can log and classify failures without knowing which
/// HTTP client produced them.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The remote service answered with a non-success status.
    #[error("{operation} failed with HTTP {status}: {message}")]
    Status {
        /// Short label of the call, e.g. `"list pull request comments"`.
        operation: String,
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
        /// Retry classification derived from the status and headers.
        retry: RetryPolicy,
    },

    /// The request never produced a response (DNS, TLS, timeout, reset).
    ///
    /// Always retryable.
    #[error("{operation} failed in transport: {message}")]
    Transport {
        /// Short label of the call.
        operation: String,
        /// Underlying client error text.
        message: String,
    },

    /// The response arrived but its body did not match the expected shape.
    #[error("{operation} returned an unexpected body: {message}")]
    Decode {
        /// Short label of the call.
        operation: String,
        /// Deserialisation error text.
        message: String,
    },
}

impl RemoteError {
    /// Returns the retry classification of this failure.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            RemoteError::Status { retry, .. } => retry.clone(),
            RemoteError::Transport { .. } => RetryPolicy::Retryable { after: None },
            RemoteError::Decode { .. } => RetryPolicy::NonRetryable,
        }
    }
}

// ---------------------------------------------------------------------------
// Domain parse errors
// ---------------------------------------------------------------------------

/// A ticket URL without the `/issue/<ID>` segment.
///
/// The link extractor only filters on the `https://linear.app` prefix, so URLs
/// such as `https://linear.app/fountain/settings` reach the resolver and land
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Ticket URL has no issue identifier: {url}")]
pub struct MalformedUrlError {
    /// The offending URL.
    pub url: String,
}

/// Invalid job manifest input.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// A required parameter was absent or blank.
    #[error("Missing manifest parameter: {name}")]
    MissingParameter {
        /// Parameter name as given on the command line / environment.
        name: &'static str,
    },

    /// `args` was not a JSON array of strings.
    #[error("Manifest args must be a JSON array of strings: {source}")]
    InvalidArgs {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Pipeline-level errors
// ---------------------------------------------------------------------------

/// Errors that halt a pipeline run.
///
/// Per-branch traversal failures and per-record write failures are *not*
/// represented here; those are absorbed into the run report.
#[derive(Debug, Error)]
pub enum ReleaseToolsError {
    /// A required credential or identifier is missing or malformed.
    ///
    /// Produced at load time; no remote call is made with an invalid config.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The release pull request's commit list could not be fetched, so there
    /// is nothing to traverse.
    #[error("Could not list commits of release pull request #{pull_request}: {source}")]
    ReleaseCommitsUnavailable {
        /// The release pull request number.
        pull_request: crate::PullRequestNumber,
        /// Underlying remote failure.
        #[source]
        source: RemoteError,
    },
}

impl ReleaseToolsError {
    /// Shorthand for [`ReleaseToolsError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        ReleaseToolsError::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
