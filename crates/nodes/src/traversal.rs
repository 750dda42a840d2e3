//! Commit → pull request → comment traversal.
//!
//! Every lookup is read-only and independent, so lookups run concurrently up to
//! a fixed limit. Results are re-ordered by their input position before being
//! merged, which keeps the output in discovery order no matter which lookup
//! finishes first.
//!
//! A failed lookup never aborts the traversal: it is logged and contributes
//! nothing.

use std::collections::HashSet;

use futures_util::stream::{self, StreamExt};
use pipeline::{
    extract_ticket_urls, BotLogin, CommitRecord, PullRequestNumber, PullRequestSource,
    PullRequestTickets, TicketMap,
};
use tracing::instrument;

/// Default upper bound on in-flight lookups.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Builds the ticket map for a release from its commits.
///
/// The key set is the union of pull requests associated with any commit, each
/// appearing once. Discovery order is commit order, then the host's order of
/// associated pull requests within a commit.
#[instrument(skip(source, commits, bot), fields(commits = commits.len(), bot = %bot))]
pub async fn collect_ticket_urls(
    source: &dyn PullRequestSource,
    commits: &[CommitRecord],
    bot: &BotLogin,
    concurrency: usize,
) -> TicketMap {
    let limit = concurrency.max(1);

    let pull_requests = associated_pull_requests(source, commits, limit).await;
    tracing::info!(
        pull_requests = pull_requests.len(),
        "Discovered associated pull requests"
    );

    let mut per_pull_request: Vec<(usize, PullRequestTickets)> =
        stream::iter(pull_requests.into_iter().enumerate())
            .map(|(index, number)| async move { (index, tickets_for(source, number, bot).await) })
            .buffer_unordered(limit)
            .collect()
            .await;
    per_pull_request.sort_by_key(|(index, _)| *index);

    TicketMap::from_entries(per_pull_request.into_iter().map(|(_, tickets)| tickets))
}

/// Distinct pull requests associated with `commits`, in discovery order.
async fn associated_pull_requests(
    source: &dyn PullRequestSource,
    commits: &[CommitRecord],
    limit: usize,
) -> Vec<PullRequestNumber> {
    let mut per_commit: Vec<(usize, Vec<PullRequestNumber>)> =
        stream::iter(commits.iter().enumerate())
            .map(|(index, commit)| async move {
                let numbers = match source.pull_requests_for_commit(&commit.sha).await {
                    Ok(numbers) => numbers,
                    Err(err) => {
                        tracing::warn!(
                            sha = %commit.sha,
                            error = %err,
                            "Pull request lookup failed; treating commit as unassociated"
                        );
                        Vec::new()
                    }
                };
                (index, numbers)
            })
            .buffer_unordered(limit)
            .collect()
            .await;
    per_commit.sort_by_key(|(index, _)| *index);

    let mut seen = HashSet::new();
    per_commit
        .into_iter()
        .flat_map(|(_, numbers)| numbers)
        .filter(|number| seen.insert(*number))
        .collect()
}

/// Distinct ticket URLs from the bot's comments on one pull request, in first
/// appearance order.
async fn tickets_for(
    source: &dyn PullRequestSource,
    number: PullRequestNumber,
    bot: &BotLogin,
) -> PullRequestTickets {
    let comments = match source.comments(number).await {
        Ok(comments) => comments,
        Err(err) => {
            tracing::warn!(
                pr = %number,
                error = %err,
                "Comment lookup failed; no tickets recorded for this pull request"
            );
            Vec::new()
        }
    };

    let mut seen = HashSet::new();
    let urls: Vec<_> = comments
        .iter()
        .filter(|comment| comment.author == bot.as_str())
        .flat_map(|comment| extract_ticket_urls(comment.body.as_deref()))
        .filter(|url| seen.insert(url.clone()))
        .collect();

    tracing::debug!(pr = %number, tickets = urls.len(), "Collected ticket links");
    PullRequestTickets {
        pull_request: number,
        urls,
    }
}

#[cfg(test)]
#[path = "traversal_tests.rs"]
mod tests;
