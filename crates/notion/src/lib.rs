//! Notion infrastructure adapter.
//!
//! Implements [`pipeline::ReleaseRecordSink`] by creating one page per
//! release record in a Notion database.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Request formatting, authentication, and response
//! parsing live here. The [`pipeline`] crate sees only
//! [`pipeline::ReleaseRecordSink`].
//!
//! ## Database schema
//!
//! | Property | Type | Value |
//! |----------|------|-------|
//! | `Linear Ticket` | title | ticket identifier |
//! | `Ticket URL` | url | ticket link |
//! | `Release Date` | date | release date |
//! | `Pull Request` | url | contributing pull request |
//! | `Project` | rich_text | repository name |
//!
//! Notion rate-limits integrations to a few requests per second. A 429 is
//! retried after the `Retry-After` delay it carries.

mod client;

#[cfg(test)]
mod stub_server;

pub use client::{page_request, NotionClient, NotionConfig, NotionError, DEFAULT_API_URL};
