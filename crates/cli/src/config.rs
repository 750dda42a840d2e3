//! Resolution of parsed arguments into validated run settings.
//!
//! Every required value is checked here so that a misconfigured run fails
//! before any remote call is made.

use github::GithubConfig;
use nodes::ChangelogConfig;
use notion::NotionConfig;
use pipeline::{BotLogin, DatabaseId, ManifestInputs, ReleaseToolsError, RepositoryId};

use crate::args::{ChangelogArgs, ManifestArgs};
use crate::event::pull_request_from_event;

/// Fully validated settings for one changelog run.
#[derive(Debug)]
pub struct ChangelogSettings {
    pub github: GithubConfig,
    pub notion: NotionConfig,
    pub changelog: ChangelogConfig,
}

fn required(value: Option<String>, what: &str) -> Result<String, ReleaseToolsError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ReleaseToolsError::configuration(format!("{what} is required")))
}

impl ChangelogArgs {
    pub fn resolve(self) -> Result<ChangelogSettings, ReleaseToolsError> {
        let github_token = required(self.github_token, "GitHub token (--github-token / GITHUB_TOKEN)")?;
        let notion_token = required(self.notion_token, "Notion token (--notion-token / NOTION_API_KEY)")?;
        let database_id = required(self.database_id, "Notion database (--database-id / NOTION_DATABASE_ID)")
            .and_then(|id| {
                DatabaseId::new(id)
                    .ok_or_else(|| ReleaseToolsError::configuration("Notion database id is empty"))
            })?;

        let raw_repository = required(self.repository, "repository (--repository / GITHUB_REPOSITORY)")?;
        let repository = RepositoryId::parse(&raw_repository).ok_or_else(|| {
            ReleaseToolsError::configuration(format!(
                "repository '{raw_repository}' is not in owner/repo form"
            ))
        })?;

        let release_pull_request = match (self.pr_number, self.event_path.as_deref()) {
            (Some(number), _) => pipeline::PullRequestNumber::new(number),
            (None, Some(path)) => pull_request_from_event(path)?.ok_or_else(|| {
                ReleaseToolsError::configuration(
                    "event payload carries no pull request; pass --pr-number",
                )
            })?,
            (None, None) => {
                return Err(ReleaseToolsError::configuration(
                    "release pull request (--pr-number / PR_NUMBER) is required",
                ))
            }
        };

        let bot = BotLogin::new(self.bot_login.trim())
            .ok_or_else(|| ReleaseToolsError::configuration("bot login must not be empty"))?;
        if self.concurrency == 0 {
            return Err(ReleaseToolsError::configuration(
                "concurrency must be at least 1",
            ));
        }

        let mut github = GithubConfig::new(github_token, repository.clone());
        github.api_url = self.github_api_url;

        let mut notion = NotionConfig::new(notion_token, database_id);
        notion.api_url = self.notion_api_url;

        Ok(ChangelogSettings {
            github,
            notion,
            changelog: ChangelogConfig {
                release_pull_request,
                repository,
                server_url: self.server_url,
                bot,
                concurrency: self.concurrency,
            },
        })
    }
}

impl ManifestArgs {
    /// Splits off the output path; field validation happens in the manifest
    /// step itself so the error names the missing parameter.
    pub fn into_inputs(self) -> (ManifestInputs, std::path::PathBuf) {
        let inputs = ManifestInputs {
            name: self.name,
            namespace: self.namespace,
            project: self.project,
            command: self.command,
            args: self.args,
            aws_account_id: self.aws_account_id,
            region: self.region,
            tag: self.tag,
            use_doppler: self.use_doppler,
        };
        (inputs, self.output)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
