//! Core domain for the release automation tools.
//!
//! This crate contains every domain concept, newtype identifier, value type,
//! and error type used by the changelog extractor and the job manifest
//! renderer. Infrastructure crates implement the traits defined here; they
//! never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no network I/O.
//! The only runtime facility it touches is `tokio::time` for retry delays.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`PullRequestNumber`, `TicketId`, etc.) |
//! | [`types`] | Shared value types (`ReleaseRecord`, `TicketMap`, `Timestamp`, etc.) |
//! | [`errors`] | Error taxonomy and retry-policy types |
//! | [`links`] | Ticket link extraction from HTML comment bodies |
//! | [`ticket`] | Ticket identifier resolution |
//! | [`retry`] | Attempt loop shared by the remote adapters |
//! | [`release`] | Release date resolution and record construction |
//! | [`ports`] | Source, sink, and clock traits |
//! | [`manifest`] | Job manifest validation and rendering |

pub mod errors;
pub mod identifiers;
pub mod links;
pub mod manifest;
pub mod ports;
pub mod release;
pub mod retry;
pub mod ticket;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{ManifestError, MalformedUrlError, ReleaseToolsError, RemoteError, RetryPolicy};
pub use identifiers::{
    BotLogin, CommitSha, DatabaseId, ProjectName, PullRequestNumber, RepositoryId, RunId,
    TicketId, TicketUrl,
};
pub use links::{extract_ticket_urls, TICKET_URL_PREFIX};
pub use manifest::{render, JobManifest, ManifestInputs, ManifestSpec};
pub use ports::{Clock, FixedClock, PullRequestSource, ReleaseRecordSink, SystemClock};
pub use release::{resolve_release_date, ReleaseContext};
pub use retry::{retry_remote, RetrySettings};
pub use ticket::resolve_ticket_id;
pub use types::{
    pull_request_url, CommentRecord, CommitRecord, PullRequestSummary, PullRequestTickets,
    ReleaseDate, ReleaseRecord, RunReport, TicketMap, Timestamp,
};
