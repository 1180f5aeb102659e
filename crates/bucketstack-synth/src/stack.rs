//! Stack assembler.
//!
//! [`assemble`] runs the whole pipeline for one stack: build the bucket
//! (which resolves retention from the environment), build its access policy
//! and derive the two exported outputs. The first error aborts; there are no
//! partial stacks.

use bucketstack_core::BucketStackResult;
use bucketstack_model::{
    AccessGrant, BucketCategory, BucketConfigOverride, Export, Intrinsic, Output, Template,
};
use serde::Serialize;
use tracing::info;
use typed_builder::TypedBuilder;

use crate::bucket::{BucketResource, build_bucket};
use crate::policy::{AccessPolicy, build_access_policy};
use crate::validation::validate_stack_name;

/// Output key of the bucket name.
pub const BUCKET_NAME_OUTPUT: &str = "StorageBucketName";

/// Output key of the bucket ARN.
pub const BUCKET_ARN_OUTPUT: &str = "StorageBucketArn";

/// Export suffix of the bucket name output.
pub const BUCKET_NAME_EXPORT_SUFFIX: &str = "-BucketName";

/// Export suffix of the bucket ARN output.
pub const BUCKET_ARN_EXPORT_SUFFIX: &str = "-BucketArn";

/// Inputs of one stack.
///
/// # Examples
///
/// ```
/// use bucketstack_model::BucketCategory;
/// use bucketstack_synth::{StackProps, assemble};
///
/// let props = StackProps::builder()
///     .stack_name("log-storage-bucket-dev")
///     .category(BucketCategory::Log)
///     .environment("dev")
///     .build();
/// let stack = assemble(&props).unwrap();
/// assert_eq!(stack.outputs[0].export_name, "log-storage-bucket-dev-BucketName");
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct StackProps {
    /// Stack name; prefixes the output export names.
    #[builder(setter(into))]
    pub stack_name: String,
    /// Bucket category.
    #[builder(default = BucketCategory::Media)]
    pub category: BucketCategory,
    /// Explicit bucket name.
    #[builder(default, setter(strip_option, into))]
    pub bucket_name: Option<String>,
    /// Template description.
    #[builder(default, setter(strip_option, into))]
    pub description: Option<String>,
    /// Deployment environment label.
    #[builder(default, setter(strip_option, into))]
    pub environment: Option<String>,
    /// Caller supplied configuration, required for `custom`.
    #[builder(default, setter(strip_option))]
    pub override_config: Option<BucketConfigOverride>,
    /// Access grants, in statement order.
    #[builder(default)]
    pub grants: Vec<AccessGrant>,
}

/// A named, exported stack output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackOutput {
    /// Output logical id.
    pub key: String,
    /// Output value.
    pub value: Intrinsic,
    /// Human readable description.
    pub description: String,
    /// Cross-stack export name.
    pub export_name: String,
}

impl StackOutput {
    fn to_output(&self) -> Output {
        Output {
            value: self.value.clone(),
            description: Some(self.description.clone()),
            export: Some(Export {
                name: self.export_name.clone(),
            }),
        }
    }
}

/// A fully assembled stack.
#[derive(Debug, Clone)]
pub struct Stack {
    /// Stack name.
    pub name: String,
    /// Template description.
    pub description: String,
    /// The storage bucket.
    pub bucket: BucketResource,
    /// The bucket's access policy.
    pub policy: AccessPolicy,
    /// Bucket name and bucket ARN outputs, in that order.
    pub outputs: [StackOutput; 2],
}

/// Default template description for `category`.
#[must_use]
pub fn default_description(category: BucketCategory) -> String {
    format!("This stack includes S3 bucket for {category} storage with intelligent tiering")
}

/// Assemble the stack described by `props`.
///
/// # Errors
///
/// Returns [`InvalidStackName`](bucketstack_core::BucketStackError::InvalidStackName)
/// for a malformed stack name, then propagates the first error from
/// [`build_bucket`] or [`build_access_policy`]: a configuration error for
/// `custom` without an override, validation errors for bad names, tiering or
/// principals.
pub fn assemble(props: &StackProps) -> BucketStackResult<Stack> {
    validate_stack_name(&props.stack_name)?;
    let bucket = build_bucket(
        props.category,
        props.override_config.as_ref(),
        props.bucket_name.as_deref(),
        props.environment.as_deref(),
    )?;
    let policy = build_access_policy(&bucket, &props.grants)?;

    let category = props.category;
    let outputs = [
        StackOutput {
            key: BUCKET_NAME_OUTPUT.to_owned(),
            value: bucket.name_ref(),
            description: format!("Name of the {category} storage bucket"),
            export_name: format!("{}{BUCKET_NAME_EXPORT_SUFFIX}", props.stack_name),
        },
        StackOutput {
            key: BUCKET_ARN_OUTPUT.to_owned(),
            value: bucket.arn(),
            description: format!("ARN of the {category} storage bucket"),
            export_name: format!("{}{BUCKET_ARN_EXPORT_SUFFIX}", props.stack_name),
        },
    ];

    let description = props
        .description
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| default_description(category));

    info!(
        stack = %props.stack_name,
        category = %category,
        retention = %bucket.config.retention,
        grants = props.grants.len(),
        "assembled stack"
    );

    Ok(Stack {
        name: props.stack_name.clone(),
        description,
        bucket,
        policy,
        outputs,
    })
}

impl Stack {
    /// Render the CloudFormation template.
    ///
    /// # Errors
    /// Returns an internal error if a resource cannot be serialized.
    pub fn to_template(&self) -> BucketStackResult<Template> {
        let mut template = Template::new(Some(self.description.clone()));
        template
            .resources
            .insert(self.bucket.logical_id.clone(), self.bucket.to_resource()?);
        template
            .resources
            .insert(self.policy.logical_id.clone(), self.policy.to_resource()?);
        for output in &self.outputs {
            template
                .outputs
                .insert(output.key.clone(), output.to_output());
        }
        Ok(template)
    }

    /// Render the template as JSON.
    ///
    /// # Errors
    /// Returns an internal error if serialization fails.
    pub fn to_json(&self, pretty: bool) -> BucketStackResult<String> {
        let template = self.to_template()?;
        let json = if pretty {
            serde_json::to_string_pretty(&template)?
        } else {
            serde_json::to_string(&template)?
        };
        Ok(json)
    }
}
