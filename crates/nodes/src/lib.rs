//! Release automation pipeline steps.
//!
//! This crate sequences calls between the business logic in the [`pipeline`]
//! crate and its port traits. It owns no domain rules of its own and never
//! talks to a concrete HTTP client.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.**
//!
//! | Module | Step |
//! |--------|------|
//! | [`changelog`] | `ChangelogExtractor`: release PR → ticket records |
//! | [`traversal`] | commit → pull request → comment fan-out |
//! | [`upsert`] | ordered, fail-at-end record writes |
//! | [`job_manifest`] | validate, render, and write the Job manifest |

pub mod changelog;
pub mod job_manifest;
pub mod traversal;
pub mod upsert;

#[cfg(test)]
mod fakes;

pub use changelog::{ChangelogConfig, ChangelogExtractor};
pub use job_manifest::{write_job_manifest, JobManifestError, DEFAULT_MANIFEST_PATH};
pub use traversal::{collect_ticket_urls, DEFAULT_CONCURRENCY};
pub use upsert::upsert_records;
