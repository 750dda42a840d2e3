//! Release record writes.
//!
//! Records are written one at a time, grouped by pull request in discovery
//! order and by URL order within a group. A rejected write is counted and the
//! loop moves on; the caller decides the exit status from the [`RunReport`].

use pipeline::{ReleaseContext, ReleaseRecordSink, RunReport, TicketMap};
use tracing::instrument;

/// Writes one record per (pull request, ticket URL) pair in `tickets`.
#[instrument(skip_all, fields(pairs = tickets.url_count(), release_date = %context.release_date))]
pub async fn upsert_records(
    sink: &dyn ReleaseRecordSink,
    tickets: &TicketMap,
    context: &ReleaseContext,
) -> RunReport {
    let mut report = RunReport::default();

    for entry in tickets.entries() {
        for url in &entry.urls {
            let record = match context.record_for(entry.pull_request, url) {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!(pr = %entry.pull_request, error = %err, "Skipping ticket link");
                    report.skipped += 1;
                    continue;
                }
            };

            match sink.create_record(&record).await {
                Ok(()) => {
                    tracing::info!(
                        pr = %record.pull_request,
                        ticket_id = %record.ticket_id,
                        "Added ticket to release database"
                    );
                    report.written += 1;
                }
                Err(err) => {
                    tracing::error!(
                        pr = %record.pull_request,
                        ticket_id = %record.ticket_id,
                        error = %err,
                        "Failed to add ticket to release database"
                    );
                    report.failed += 1;
                }
            }
        }
    }

    report
}
