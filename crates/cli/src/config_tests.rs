use std::io::Write;
use std::path::PathBuf;

use pipeline::PullRequestNumber;

use super::*;

fn complete_args() -> ChangelogArgs {
    ChangelogArgs {
        github_token: Some("gh-token".into()),
        notion_token: Some("notion-token".into()),
        database_id: Some("db-1".into()),
        pr_number: Some(42),
        repository: Some("fountain/hire".into()),
        bot_login: "linear".into(),
        concurrency: 8,
        github_api_url: github::DEFAULT_API_URL.into(),
        server_url: "https://github.com".into(),
        notion_api_url: notion::DEFAULT_API_URL.into(),
        event_path: None,
    }
}

fn assert_configuration_error(args: ChangelogArgs) {
    let err = args.resolve().unwrap_err();
    assert!(
        matches!(err, ReleaseToolsError::Configuration { .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn complete_arguments_resolve() {
    let settings = complete_args().resolve().unwrap();

    assert_eq!(settings.github.token, "gh-token");
    assert_eq!(settings.github.repository.to_string(), "fountain/hire");
    assert_eq!(settings.notion.database_id.as_str(), "db-1");
    assert_eq!(settings.changelog.release_pull_request, PullRequestNumber::new(42));
    assert_eq!(settings.changelog.bot.as_str(), "linear");
    assert_eq!(settings.changelog.project().unwrap().as_str(), "hire");
}

#[test]
fn endpoint_overrides_are_applied() {
    let mut args = complete_args();
    args.github_api_url = "https://ghe.example.com/api/v3".into();
    args.notion_api_url = "http://127.0.0.1:9000/v1".into();

    let settings = args.resolve().unwrap();

    assert_eq!(settings.github.api_url, "https://ghe.example.com/api/v3");
    assert_eq!(settings.notion.api_url, "http://127.0.0.1:9000/v1");
}

#[test]
fn missing_tokens_are_rejected() {
    let mut args = complete_args();
    args.github_token = None;
    assert_configuration_error(args);

    let mut args = complete_args();
    args.notion_token = Some("   ".into());
    assert_configuration_error(args);

    let mut args = complete_args();
    args.database_id = None;
    assert_configuration_error(args);
}

#[test]
fn malformed_repository_is_rejected() {
    let mut args = complete_args();
    args.repository = Some("just-a-name".into());
    assert_configuration_error(args);
}

#[test]
fn zero_concurrency_is_rejected() {
    let mut args = complete_args();
    args.concurrency = 0;
    assert_configuration_error(args);
}

#[test]
fn pull_request_falls_back_to_event_payload() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"pull_request": {"number": 77}}"#).unwrap();

    let mut args = complete_args();
    args.pr_number = None;
    args.event_path = Some(file.path().to_path_buf());

    let settings = args.resolve().unwrap();
    assert_eq!(settings.changelog.release_pull_request, PullRequestNumber::new(77));
}

#[test]
fn explicit_pull_request_wins_over_event_payload() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"pull_request": {"number": 77}}"#).unwrap();

    let mut args = complete_args();
    args.event_path = Some(file.path().to_path_buf());

    let settings = args.resolve().unwrap();
    assert_eq!(settings.changelog.release_pull_request, PullRequestNumber::new(42));
}

#[test]
fn missing_pull_request_is_rejected() {
    let mut args = complete_args();
    args.pr_number = None;
    assert_configuration_error(args);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{"ref": "refs/heads/main"}"#).unwrap();
    let mut args = complete_args();
    args.pr_number = None;
    args.event_path = Some(file.path().to_path_buf());
    assert_configuration_error(args);
}

#[test]
fn manifest_arguments_split_into_inputs_and_output() {
    let args = ManifestArgs {
        name: Some("migrate".into()),
        namespace: Some("jobs".into()),
        project: Some("hire".into()),
        command: Some("bundle".into()),
        args: Some(r#"["exec","rake"]"#.into()),
        aws_account_id: Some("123456789012".into()),
        region: Some("us-east-1".into()),
        tag: Some("v1".into()),
        use_doppler: true,
        output: PathBuf::from("out.json"),
    };

    let (inputs, output) = args.into_inputs();

    assert_eq!(output, PathBuf::from("out.json"));
    assert_eq!(inputs.name.as_deref(), Some("migrate"));
    assert!(inputs.use_doppler);
}
