//! Cloud assembly writer.
//!
//! Writes the synthesized template together with a `manifest.json` that
//! describes it, the layout deployment tooling reads from `cdk.out`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bucketstack_core::{BucketStackResult, StackEnvironment};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::stack::Stack;

/// Cloud assembly schema version written to the manifest.
pub const ASSEMBLY_VERSION: &str = "36.0.0";

/// Manifest file name.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Artifact type of a CloudFormation stack.
pub const STACK_ARTIFACT_TYPE: &str = "aws:cloudformation:stack";

/// Top-level `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Schema version.
    pub version: String,
    /// Artifacts by id.
    pub artifacts: BTreeMap<String, Artifact>,
}

/// One manifest artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Artifact type.
    #[serde(rename = "type")]
    pub artifact_type: String,
    /// Target environment, `aws://<account>/<region>`.
    pub environment: String,
    /// Artifact properties.
    pub properties: ArtifactProperties,
}

/// Properties of a stack artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactProperties {
    /// Template file, relative to the assembly directory.
    pub template_file: String,
}

/// Template file name of `stack`.
#[must_use]
pub fn template_file_name(stack: &Stack) -> String {
    format!("{}.template.json", stack.name)
}

/// The manifest describing `stack` deployed to `env`.
#[must_use]
pub fn manifest(stack: &Stack, env: &StackEnvironment) -> Manifest {
    let artifact = Artifact {
        artifact_type: STACK_ARTIFACT_TYPE.to_owned(),
        environment: env.uri(),
        properties: ArtifactProperties {
            template_file: template_file_name(stack),
        },
    };
    Manifest {
        version: ASSEMBLY_VERSION.to_owned(),
        artifacts: BTreeMap::from([(stack.name.clone(), artifact)]),
    }
}

/// Write `stack` as a cloud assembly into `dir`, creating it if needed.
///
/// Returns the path of the template file.
///
/// # Errors
/// Returns an internal error if the directory or a file cannot be written.
pub fn write_assembly(
    dir: &Path,
    stack: &Stack,
    env: &StackEnvironment,
    pretty: bool,
) -> BucketStackResult<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let template_path = dir.join(template_file_name(stack));
    std::fs::write(&template_path, stack.to_json(pretty)?)
        .with_context(|| format!("failed to write template {}", template_path.display()))?;

    let manifest_path = dir.join(MANIFEST_FILE);
    let manifest_json = serde_json::to_string_pretty(&manifest(stack, env))?;
    std::fs::write(&manifest_path, manifest_json)
        .with_context(|| format!("failed to write manifest {}", manifest_path.display()))?;

    info!(
        stack = %stack.name,
        template = %template_path.display(),
        environment = %env.uri(),
        "wrote cloud assembly"
    );
    Ok(template_path)
}
