//! Changelog extraction entry point.
//!
//! Sequence for one release pull request:
//!
//! 1. Fetch the release pull request title and resolve the release date.
//! 2. List the release pull request's commits (fatal on failure).
//! 3. Traverse commits → associated pull requests → bot comments.
//! 4. Write one release record per (pull request, ticket URL).

use std::sync::Arc;

use pipeline::{
    resolve_release_date, BotLogin, Clock, ProjectName, PullRequestNumber, PullRequestSource,
    ReleaseContext, ReleaseRecordSink, ReleaseToolsError, RepositoryId, RunId, RunReport,
};
use tracing::Instrument;

use crate::traversal::collect_ticket_urls;
use crate::upsert::upsert_records;

/// Everything one changelog run needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct ChangelogConfig {
    /// The aggregating release pull request.
    pub release_pull_request: PullRequestNumber,
    /// Repository holding the release and its contributing pull requests.
    pub repository: RepositoryId,
    /// Web root used for pull request back-references.
    pub server_url: String,
    /// Login whose comments carry the ticket links.
    pub bot: BotLogin,
    /// Upper bound on concurrent lookups during traversal.
    pub concurrency: usize,
}

impl ChangelogConfig {
    /// Project name written on every record: the repository name.
    pub fn project(&self) -> Result<ProjectName, ReleaseToolsError> {
        ProjectName::new(self.repository.name())
            .ok_or_else(|| ReleaseToolsError::configuration("repository name is empty"))
    }
}

/// Drives one changelog run against injected source, sink, and clock.
pub struct ChangelogExtractor {
    source: Arc<dyn PullRequestSource>,
    sink: Arc<dyn ReleaseRecordSink>,
    clock: Arc<dyn Clock>,
}

impl ChangelogExtractor {
    pub fn new(
        source: Arc<dyn PullRequestSource>,
        sink: Arc<dyn ReleaseRecordSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            sink,
            clock,
        }
    }

    /// Runs the full pipeline.
    ///
    /// Returns `Err` only when nothing can be done at all (bad configuration,
    /// or the release pull request's commits cannot be listed). Per-record
    /// failures are reported through [`RunReport::failed`].
    pub async fn run(&self, config: &ChangelogConfig) -> Result<RunReport, ReleaseToolsError> {
        let run_id = RunId::new_random();
        let span = tracing::info_span!(
            "changelog_run",
            run_id = %run_id,
            release_pr = %config.release_pull_request,
            repository = %config.repository,
        );
        self.run_inner(config).instrument(span).await
    }

    async fn run_inner(&self, config: &ChangelogConfig) -> Result<RunReport, ReleaseToolsError> {
        let project = config.project()?;
        let release = config.release_pull_request;

        let title = match self.source.pull_request(release).await {
            Ok(summary) => Some(summary.title),
            Err(err) => {
                tracing::warn!(error = %err, "Could not fetch release pull request title");
                None
            }
        };
        let release_date = resolve_release_date(title.as_deref(), self.clock.as_ref());

        let commits = self.source.commits(release).await.map_err(|source| {
            ReleaseToolsError::ReleaseCommitsUnavailable {
                pull_request: release,
                source,
            }
        })?;
        tracing::info!(commits = commits.len(), release_date = %release_date, "Listed release commits");

        let tickets = collect_ticket_urls(
            self.source.as_ref(),
            &commits,
            &config.bot,
            config.concurrency,
        )
        .await;

        let context = ReleaseContext {
            repository: config.repository.clone(),
            server_url: config.server_url.clone(),
            release_date,
            project,
        };
        let report = upsert_records(self.sink.as_ref(), &tickets, &context).await;

        tracing::info!(
            written = report.written,
            skipped = report.skipped,
            failed = report.failed,
            "Changelog run finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "changelog_tests.rs"]
mod tests;
