//! Release tools CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration** from flags and environment variables, and
//!    validate it before any remote call.
//! 2. **Wire observability**: `tracing-subscriber` with a text or JSON layer,
//!    plus an OpenTelemetry OTLP exporter when an endpoint is configured.
//! 3. **Construct infrastructure** (`GithubClient`, `NotionClient`,
//!    `SystemClock`) and inject it into the [`nodes`] steps.
//! 4. **Map the outcome to an exit code**: non-zero on configuration errors,
//!    fatal remote errors, or any record that could not be written.

mod args;
mod config;
mod event;
mod observability;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use github::GithubClient;
use nodes::{write_job_manifest, ChangelogExtractor};
use notion::NotionClient;
use pipeline::{RunReport, SystemClock};

use crate::args::{ChangelogArgs, Cli, Command, ManifestArgs};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = match observability::init(cli.log_format) {
        Ok(telemetry) => telemetry,
        Err(err) => {
            eprintln!("Failed to initialise logging: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let code = match run(cli.command).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "Run failed");
            ExitCode::FAILURE
        }
    };

    telemetry.shutdown();
    code
}

async fn run(command: Command) -> anyhow::Result<ExitCode> {
    match command {
        Command::Changelog(args) => run_changelog(args).await,
        Command::JobManifest(args) => run_job_manifest(args).await,
    }
}

async fn run_changelog(args: ChangelogArgs) -> anyhow::Result<ExitCode> {
    let settings = args.resolve()?;

    let source = GithubClient::new(settings.github).context("constructing GitHub client")?;
    let sink = NotionClient::new(settings.notion).context("constructing Notion client")?;
    let extractor =
        ChangelogExtractor::new(Arc::new(source), Arc::new(sink), Arc::new(SystemClock));

    let report = extractor.run(&settings.changelog).await?;
    if !report.is_success() {
        tracing::error!(
            written = report.written,
            failed = report.failed,
            "Some release records could not be written"
        );
    }
    Ok(ExitCode::from(report_status(&report)))
}

/// Process status for a finished changelog run: 0 only when every write succeeded.
fn report_status(report: &RunReport) -> u8 {
    if report.is_success() {
        0
    } else {
        1
    }
}

async fn run_job_manifest(args: ManifestArgs) -> anyhow::Result<ExitCode> {
    let (inputs, output) = args.into_inputs();
    write_job_manifest(inputs, &SystemClock, &output).await?;
    Ok(ExitCode::SUCCESS)
}
