//! GitHub Actions event payload reader.

use std::path::Path;

use pipeline::{PullRequestNumber, ReleaseToolsError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestRef>,
}

#[derive(Debug, Deserialize)]
struct PullRequestRef {
    number: u64,
}

/// Reads `pull_request.number` from the workflow event payload at `path`.
///
/// Returns `Ok(None)` for payloads of events that carry no pull request.
pub fn pull_request_from_event(
    path: &Path,
) -> Result<Option<PullRequestNumber>, ReleaseToolsError> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        ReleaseToolsError::configuration(format!(
            "cannot read event payload {}: {err}",
            path.display()
        ))
    })?;
    let payload: EventPayload = serde_json::from_str(&raw).map_err(|err| {
        ReleaseToolsError::configuration(format!(
            "event payload {} is not valid JSON: {err}",
            path.display()
        ))
    })?;
    Ok(payload
        .pull_request
        .map(|pr| PullRequestNumber::new(pr.number)))
}
