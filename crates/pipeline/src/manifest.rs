//! Kubernetes batch Job manifest rendering.
//!
//! [`ManifestSpec::from_inputs`] validates the flat parameter set and
//! [`render`] turns a spec into the [`JobManifest`] document. Both are pure;
//! writing the document is the orchestration layer's job.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::{ManifestError, Timestamp};

/// CPU request and limit for every rendered job.
pub const JOB_CPU: &str = "1";
/// Memory request and limit for every rendered job.
pub const JOB_MEMORY: &str = "4Gi";

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Raw, unvalidated manifest parameters as they arrive from the CLI.
#[derive(Debug, Clone, Default)]
pub struct ManifestInputs {
    /// Job and container name.
    pub name: Option<String>,
    /// Target namespace.
    pub namespace: Option<String>,
    /// ECR repository name and env source prefix.
    pub project: Option<String>,
    /// Container entrypoint, e.g. `bundle`.
    pub command: Option<String>,
    /// JSON array of strings, e.g. `["db:migrate", "--verbose"]`.
    pub args: Option<String>,
    /// AWS account owning the ECR registry.
    pub aws_account_id: Option<String>,
    /// AWS region of the ECR registry.
    pub region: Option<String>,
    /// Image tag to run.
    pub tag: Option<String>,
    /// Reference the Doppler-synced secret instead of the config map.
    pub use_doppler: bool,
}

/// Container image reference in an ECR registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Registry host, e.g. `123456789012.dkr.ecr.us-east-1.amazonaws.com`.
    pub registry: String,
    /// Repository within the registry (the project name).
    pub repository: String,
    /// Image tag.
    pub tag: String,
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}:{}", self.registry, self.repository, self.tag)
    }
}

/// Where the container's environment variables come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvFromSource {
    /// A config map named `<project>-env`.
    ConfigMapRef {
        /// Config map name.
        name: String,
    },
    /// A secret named `<project>-doppler-env`.
    SecretRef {
        /// Secret name.
        name: String,
    },
}

impl EnvFromSource {
    /// Picks the env source for `project`.
    pub fn for_project(project: &str, use_doppler: bool) -> Self {
        if use_doppler {
            EnvFromSource::SecretRef {
                name: format!("{project}-doppler-env"),
            }
        } else {
            EnvFromSource::ConfigMapRef {
                name: format!("{project}-env"),
            }
        }
    }
}

/// Validated job parameters. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSpec {
    /// Base name; the rendered Job name adds a timestamp suffix.
    pub name: String,
    /// Target namespace.
    pub namespace: String,
    /// Image to run.
    pub image: ImageRef,
    /// Container entrypoint.
    pub command: String,
    /// Container arguments, in order.
    pub args: Vec<String>,
    /// Source of the container's environment variables.
    pub env_source: EnvFromSource,
    /// CPU request and limit.
    pub cpu: String,
    /// Memory request and limit.
    pub memory: String,
}

impl ManifestSpec {
    /// Validates raw inputs.
    ///
    /// Every parameter is required. `args` must parse as a JSON array of
    /// strings; anything else is rejected rather than guessed at.
    pub fn from_inputs(inputs: ManifestInputs) -> Result<Self, ManifestError> {
        let name = required(inputs.name, "name")?;
        let namespace = required(inputs.namespace, "namespace")?;
        let project = required(inputs.project, "project")?;
        let command = required(inputs.command, "command")?;
        let raw_args = required(inputs.args, "args")?;
        let aws_account_id = required(inputs.aws_account_id, "aws-account-id")?;
        let region = required(inputs.region, "region")?;
        let tag = required(inputs.tag, "tag")?;

        let args: Vec<String> = serde_json::from_str(&raw_args)
            .map_err(|source| ManifestError::InvalidArgs { source })?;

        Ok(ManifestSpec {
            name,
            namespace,
            image: ImageRef {
                registry: format!("{aws_account_id}.dkr.ecr.{region}.amazonaws.com"),
                repository: project.clone(),
                tag,
            },
            command,
            args,
            env_source: EnvFromSource::for_project(&project, inputs.use_doppler),
            cpu: JOB_CPU.to_string(),
            memory: JOB_MEMORY.to_string(),
        })
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, ManifestError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ManifestError::MissingParameter { name })
}

// ---------------------------------------------------------------------------
// Rendered document
// ---------------------------------------------------------------------------

/// A `batch/v1` Job, serialised with Kubernetes field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobManifest {
    /// Always `batch/v1`.
    pub api_version: String,
    /// Always `Job`.
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: JobSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// `<name>-<timestamp suffix>`, unique per render.
    pub name: String,
    pub namespace: String,
}

/// Run-once Job settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// Pod retries before the Job is marked failed; `0` means no retries.
    pub backoff_limit: u32,
    /// Successful pods required.
    pub completions: u32,
    /// Pods running at once.
    pub parallelism: u32,
    pub template: PodTemplate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodTemplate {
    pub spec: PodSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    /// Exactly one container.
    pub containers: Vec<Container>,
    /// `Never`, so a failed pod is not restarted in place.
    pub restart_policy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Same as the Job base name.
    pub name: String,
    /// Fully qualified ECR image reference.
    pub image: String,
    /// `Always`, so a moved tag is picked up.
    pub image_pull_policy: String,
    /// Entrypoint as a single-element list.
    pub command: Vec<String>,
    pub args: Vec<String>,
    pub env_from: Vec<EnvFromSource>,
    pub resources: Resources,
}

/// Requests and limits; both are set to the same quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub limits: ResourceQuantities,
    pub requests: ResourceQuantities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceQuantities {
    /// Kubernetes CPU quantity, e.g. `1`.
    pub cpu: String,
    /// Kubernetes memory quantity, e.g. `4Gi`.
    pub memory: String,
}

/// Turns a timestamp into a suffix that is valid inside a resource name.
///
/// `2025-01-30T12:34:56.789Z` becomes `2025-01-30t12-34-56-789z`.
pub fn job_name_suffix(now: Timestamp) -> String {
    now.as_datetime()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .to_lowercase()
        .replace([':', '.'], "-")
}

/// Renders the Job document for `spec` at time `now`.
pub fn render(spec: &ManifestSpec, now: Timestamp) -> JobManifest {
    let quantities = ResourceQuantities {
        cpu: spec.cpu.clone(),
        memory: spec.memory.clone(),
    };

    JobManifest {
        api_version: "batch/v1".to_string(),
        kind: "Job".to_string(),
        metadata: ObjectMeta {
            name: format!("{}-{}", spec.name, job_name_suffix(now)),
            namespace: spec.namespace.clone(),
        },
        spec: JobSpec {
            backoff_limit: 0,
            completions: 1,
            parallelism: 1,
            template: PodTemplate {
                spec: PodSpec {
                    containers: vec![Container {
                        name: spec.name.clone(),
                        image: spec.image.to_string(),
                        image_pull_policy: "Always".to_string(),
                        command: vec![spec.command.clone()],
                        args: spec.args.clone(),
                        env_from: vec![spec.env_source.clone()],
                        resources: Resources {
                            limits: quantities.clone(),
                            requests: quantities,
                        },
                    }],
                    restart_policy: "Never".to_string(),
                },
            },
        },
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
