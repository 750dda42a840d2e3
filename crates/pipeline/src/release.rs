//! Release date resolution and release record construction.

use crate::{
    pull_request_url, resolve_ticket_id, Clock, MalformedUrlError, ProjectName,
    PullRequestNumber, ReleaseDate, ReleaseRecord, RepositoryId, TicketUrl,
};

/// Marker separating the prefix of a release pull request title from its date.
pub const RELEASE_TITLE_MARKER: &str = "Release ";

/// Resolves the release date from the release pull request's title.
///
/// `"Release 2025-01-30"` yields `2025-01-30`. When the title is unavailable,
/// lacks the marker, or has nothing after it, today's UTC date from `clock`
/// is used instead.
pub fn resolve_release_date(title: Option<&str>, clock: &dyn Clock) -> ReleaseDate {
    let from_title = title
        .and_then(|t| t.split_once(RELEASE_TITLE_MARKER))
        .and_then(|(_, rest)| ReleaseDate::new(rest));

    match from_title {
        Some(date) => date,
        None => {
            let today = ReleaseDate::from_date(clock.now().date());
            tracing::info!(
                title = title.unwrap_or_default(),
                fallback = %today,
                "Release title has no date; using today"
            );
            today
        }
    }
}

/// Everything a [`ReleaseRecord`] needs besides the per-URL data.
#[derive(Debug, Clone)]
pub struct ReleaseContext {
    /// Repository the pull requests live in.
    pub repository: RepositoryId,
    /// Web root used for back-reference links, e.g. `https://github.com`.
    pub server_url: String,
    /// Resolved release date shared by every record of the run.
    pub release_date: ReleaseDate,
    /// Project name written on every record.
    pub project: ProjectName,
}

impl ReleaseContext {
    /// Builds the record for one (pull request, ticket URL) pair.
    pub fn record_for(
        &self,
        pull_request: PullRequestNumber,
        ticket_url: &TicketUrl,
    ) -> Result<ReleaseRecord, MalformedUrlError> {
        let ticket_id = resolve_ticket_id(ticket_url)?;
        Ok(ReleaseRecord {
            pull_request,
            pull_request_url: pull_request_url(&self.server_url, &self.repository, pull_request),
            ticket_url: ticket_url.clone(),
            ticket_id,
            release_date: self.release_date.clone(),
            project: self.project.clone(),
        })
    }
}

#[cfg(test)]
#[path = "release_tests.rs"]
mod tests;
