//! GitHub adapter errors.

use pipeline::{RemoteError, RetryPolicy};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GithubError {
    /// GitHub answered with a non-success status.
    #[error("{operation} failed with HTTP {status}: {message}")]
    Status {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// No response was received.
    #[error("{operation} failed in transport: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: octocrab::Error,
    },

    /// The response body did not match the expected shape.
    #[error("{operation} returned an unexpected body: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: octocrab::Error,
    },

    /// The client itself could not be constructed.
    #[error("Could not build GitHub client: {0}")]
    Client(#[source] octocrab::Error),
}

impl GithubError {
    /// Sorts an octocrab failure into status, decode, or transport.
    pub(crate) fn from_octocrab(operation: &'static str, err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => GithubError::Status {
                operation,
                status: source.status_code.as_u16(),
                message: source.message.clone(),
            },
            source @ (octocrab::Error::Serde { .. } | octocrab::Error::Json { .. }) => {
                GithubError::Decode { operation, source }
            }
            source => GithubError::Transport { operation, source },
        }
    }
}

impl From<GithubError> for RemoteError {
    fn from(err: GithubError) -> Self {
        match err {
            GithubError::Status {
                operation,
                status,
                message,
            } => RemoteError::Status {
                operation: operation.to_string(),
                status,
                message,
                // octocrab does not surface response headers on errors.
                retry: RetryPolicy::for_status(status, None),
            },
            GithubError::Transport { operation, source } => RemoteError::Transport {
                operation: operation.to_string(),
                message: source.to_string(),
            },
            GithubError::Decode { operation, source } => RemoteError::Decode {
                operation: operation.to_string(),
                message: source.to_string(),
            },
            GithubError::Client(source) => RemoteError::Transport {
                operation: "build client".to_string(),
                message: source.to_string(),
            },
        }
    }
}
