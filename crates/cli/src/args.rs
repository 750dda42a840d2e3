//! Command-line surface.
//!
//! Every option can be given as a flag or through the environment variable
//! named next to it. When both are present the flag wins.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use nodes::{DEFAULT_CONCURRENCY, DEFAULT_MANIFEST_PATH};

/// Default web root for pull request back-references.
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Default automation account whose comments carry ticket links.
pub const DEFAULT_BOT_LOGIN: &str = "linear";

#[derive(Debug, Parser)]
#[command(name = "release-tools", version, about = "Release changelog and job manifest automation")]
pub struct Cli {
    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record the Linear tickets shipped by a release pull request in Notion.
    Changelog(ChangelogArgs),
    /// Render a Kubernetes Job manifest for a one-off task.
    JobManifest(ManifestArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ChangelogArgs {
    /// GitHub token used to read pull requests and comments.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Notion integration token.
    #[arg(long, env = "NOTION_API_KEY", hide_env_values = true)]
    pub notion_token: Option<String>,

    /// Notion database receiving one page per ticket.
    #[arg(long, env = "NOTION_DATABASE_ID")]
    pub database_id: Option<String>,

    /// Release pull request number. Read from the GitHub event payload when absent.
    #[arg(long, env = "PR_NUMBER")]
    pub pr_number: Option<u64>,

    /// Repository in `owner/repo` form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Login of the bot whose comments are trusted.
    #[arg(long, env = "LINEAR_BOT_LOGIN", default_value = DEFAULT_BOT_LOGIN)]
    pub bot_login: String,

    /// Maximum concurrent GitHub lookups.
    #[arg(long, env = "CHANGELOG_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    #[arg(long, env = "GITHUB_API_URL", default_value = github::DEFAULT_API_URL)]
    pub github_api_url: String,

    #[arg(long, env = "GITHUB_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    #[arg(long, env = "NOTION_API_URL", default_value = notion::DEFAULT_API_URL)]
    pub notion_api_url: String,

    /// GitHub Actions event payload (`pull_request.number` fallback).
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ManifestArgs {
    /// Job and container name.
    #[arg(long, env = "NAME")]
    pub name: Option<String>,

    #[arg(long, env = "NAMESPACE")]
    pub namespace: Option<String>,

    /// Project name: ECR repository and env source prefix.
    #[arg(long, env = "PROJECT")]
    pub project: Option<String>,

    #[arg(long, env = "COMMAND")]
    pub command: Option<String>,

    /// Container args as a JSON array of strings.
    #[arg(long, env = "ARGS")]
    pub args: Option<String>,

    #[arg(long, env = "AWS_ACCOUNT_ID")]
    pub aws_account_id: Option<String>,

    #[arg(long, env = "REGION")]
    pub region: Option<String>,

    /// Image tag.
    #[arg(long, env = "TAG")]
    pub tag: Option<String>,

    /// Load env from the `<project>-doppler-env` secret instead of the config map.
    #[arg(long, env = "USE_DOPPLER")]
    pub use_doppler: bool,

    /// Output file.
    #[arg(long, env = "JOB_MANIFEST_PATH", default_value = DEFAULT_MANIFEST_PATH)]
    pub output: PathBuf,
}
