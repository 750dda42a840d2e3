//! Job manifest output step.

use std::path::{Path, PathBuf};

use pipeline::{render, Clock, JobManifest, ManifestError, ManifestInputs, ManifestSpec};
use thiserror::Error;

/// Default output location, relative to the working directory.
pub const DEFAULT_MANIFEST_PATH: &str = "job.json";

#[derive(Debug, Error)]
pub enum JobManifestError {
    #[error(transparent)]
    Invalid(#[from] ManifestError),

    #[error("Could not serialise job manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Could not write job manifest to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validates `inputs`, renders the Job at the clock's current time, and writes
/// it to `path` as 2-space indented JSON.
pub async fn write_job_manifest(
    inputs: ManifestInputs,
    clock: &dyn Clock,
    path: &Path,
) -> Result<JobManifest, JobManifestError> {
    let spec = ManifestSpec::from_inputs(inputs)?;
    let manifest = render(&spec, clock.now());

    let mut json = serde_json::to_string_pretty(&manifest)?;
    json.push('\n');
    tokio::fs::write(path, json)
        .await
        .map_err(|source| JobManifestError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        job = %manifest.metadata.name,
        namespace = %manifest.metadata.namespace,
        "Wrote job manifest"
    );
    Ok(manifest)
}
