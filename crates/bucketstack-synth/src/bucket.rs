//! Bucket resource builder.
//!
//! Resolves a category preset (or the default record for `custom`), merges
//! the caller override over it and attaches the retention disposition. The
//! resulting [`BucketResource`] always blocks public access, encrypts at
//! rest and enforces TLS; no preset or override can turn those off.

use bucketstack_core::{BucketStackError, BucketStackResult};
use bucketstack_model::properties::{
    AccessTier, BUCKET_RESOURCE_TYPE, BucketEncryption, BucketProperties,
    IntelligentTieringConfiguration, LifecycleConfiguration, LifecycleRule,
    NoncurrentVersionExpiration, PublicAccessBlockConfiguration, ServerSideEncryptionByDefault,
    ServerSideEncryptionRule, Status, Tiering, Transition, TransitionStorageClass,
    VersioningConfiguration, VersioningStatus,
};
use bucketstack_model::{
    BucketCategory, BucketConfig, BucketConfigOverride, Intrinsic, Resource, ServerSideEncryption,
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::presets::preset;
use crate::retention::resolve_retention;
use crate::validation::{validate_bucket_name, validate_tiering};

/// Logical id of the bucket resource in the template.
pub const BUCKET_LOGICAL_ID: &str = "StorageBucket";

/// Id of the intelligent tiering configuration.
pub const TIERING_CONFIGURATION_ID: &str = "archive-infrequent-access";

/// Id of the lifecycle rule.
pub const LIFECYCLE_RULE_ID: &str = "intelligent-tiering-transition";

/// Descriptor of the storage bucket resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketResource {
    /// Logical id in the template.
    pub logical_id: String,
    /// Category the configuration was derived from.
    pub category: BucketCategory,
    /// Resolved configuration.
    pub config: BucketConfig,
    /// Public access block; always [`PublicAccessBlockConfiguration::BLOCK_ALL`].
    pub public_access: PublicAccessBlockConfiguration,
    /// Whether non-TLS requests are denied; always `true`.
    pub enforce_ssl: bool,
}

impl BucketResource {
    /// The bucket name, as `Ref` of the bucket resource.
    #[must_use]
    pub fn name_ref(&self) -> Intrinsic {
        Intrinsic::reference(&self.logical_id)
    }

    /// The bucket ARN.
    #[must_use]
    pub fn arn(&self) -> Intrinsic {
        Intrinsic::get_att(&self.logical_id, "Arn")
    }

    /// ARN pattern covering every object in the bucket.
    #[must_use]
    pub fn objects_arn(&self) -> Intrinsic {
        Intrinsic::concat(vec![self.arn(), Intrinsic::literal("/*")])
    }

    /// Encryption algorithm uploads must declare.
    #[must_use]
    pub fn encryption(&self) -> ServerSideEncryption {
        self.config.encryption
    }

    /// Render the CloudFormation properties.
    #[must_use]
    pub fn properties(&self) -> BucketProperties {
        let config = &self.config;

        let kms_master_key_id = match config.encryption {
            ServerSideEncryption::AwsKms => config.kms_master_key_id.clone(),
            ServerSideEncryption::Aes256 => None,
        };

        BucketProperties {
            bucket_name: config.name.clone(),
            bucket_encryption: BucketEncryption {
                server_side_encryption_configuration: vec![ServerSideEncryptionRule {
                    server_side_encryption_by_default: ServerSideEncryptionByDefault {
                        sse_algorithm: config.encryption,
                        kms_master_key_id,
                    },
                }],
            },
            public_access_block_configuration: self.public_access,
            versioning_configuration: config.versioned.then_some(VersioningConfiguration {
                status: VersioningStatus::Enabled,
            }),
            intelligent_tiering_configurations: vec![IntelligentTieringConfiguration {
                id: TIERING_CONFIGURATION_ID.to_owned(),
                status: Status::from(config.tiering.enabled),
                tierings: vec![
                    Tiering {
                        access_tier: AccessTier::ArchiveAccess,
                        days: config.tiering.archive_after_days,
                    },
                    Tiering {
                        access_tier: AccessTier::DeepArchiveAccess,
                        days: config.tiering.deep_archive_after_days,
                    },
                ],
            }],
            lifecycle_configuration: Some(LifecycleConfiguration {
                rules: vec![LifecycleRule {
                    id: Some(LIFECYCLE_RULE_ID.to_owned()),
                    status: Status::Enabled,
                    transitions: vec![Transition {
                        storage_class: TransitionStorageClass::IntelligentTiering,
                        transition_in_days: config.lifecycle.transition_to_tiering_days,
                    }],
                    noncurrent_version_expiration: Some(NoncurrentVersionExpiration {
                        noncurrent_days: config.lifecycle.noncurrent_version_expiration_days,
                    }),
                }],
            }),
        }
    }

    /// Render the template resource.
    ///
    /// # Errors
    /// Returns an internal error if the properties cannot be serialized.
    pub fn to_resource(&self) -> BucketStackResult<Resource> {
        let policy = self.config.retention.deletion_policy();
        Ok(Resource {
            resource_type: BUCKET_RESOURCE_TYPE.to_owned(),
            properties: serde_json::to_value(self.properties())?,
            deletion_policy: Some(policy),
            update_replace_policy: Some(policy),
        })
    }
}

/// Build the bucket descriptor.
///
/// - `category` selects the preset; [`BucketCategory::Custom`] has none and
///   requires `override_config`.
/// - `override_config` is merged over the preset field by field.
/// - `name` beats any name in the override. Empty names count as unset.
/// - `environment` decides retention through
///   [`resolve_retention`](crate::retention::resolve_retention).
///
/// # Errors
///
/// - [`BucketStackError::MissingOverride`] for `custom` without an override.
/// - [`BucketStackError::InvalidBucketName`] if the resolved name breaks the
///   S3 naming rules.
/// - [`BucketStackError::InvalidTiering`] if the deep archive tier precedes
///   the archive tier.
pub fn build_bucket(
    category: BucketCategory,
    override_config: Option<&BucketConfigOverride>,
    name: Option<&str>,
    environment: Option<&str>,
) -> BucketStackResult<BucketResource> {
    let mut config = match (preset(category), override_config) {
        (Some(base), Some(ovr)) => merge(base, ovr),
        (Some(base), None) => base,
        (None, Some(ovr)) => merge(BucketConfig::default(), ovr),
        (None, None) => {
            return Err(BucketStackError::MissingOverride {
                category: category.to_string(),
            });
        }
    };

    if let Some(name) = name.filter(|n| !n.is_empty()) {
        config.name = Some(name.to_owned());
    }
    if let Some(name) = &config.name {
        validate_bucket_name(name)?;
    }
    validate_tiering(&config.tiering)?;

    // Baseline guarantees.
    config.encrypted = true;
    config.retention = resolve_retention(environment);

    debug!(
        category = %category,
        bucket_name = config.name.as_deref().unwrap_or("<generated>"),
        versioned = config.versioned,
        archive_days = config.tiering.archive_after_days,
        deep_archive_days = config.tiering.deep_archive_after_days,
        retention = %config.retention,
        "resolved bucket configuration"
    );

    Ok(BucketResource {
        logical_id: BUCKET_LOGICAL_ID.to_owned(),
        category,
        config,
        public_access: PublicAccessBlockConfiguration::BLOCK_ALL,
        enforce_ssl: true,
    })
}

/// Merge `ovr` over `base`; unset override fields keep the base value.
fn merge(base: BucketConfig, ovr: &BucketConfigOverride) -> BucketConfig {
    let mut config = base;

    if let Some(name) = ovr.bucket_name.as_deref().filter(|n| !n.is_empty()) {
        config.name = Some(name.to_owned());
    }
    if let Some(versioned) = ovr.versioned {
        config.versioned = versioned;
    }
    if ovr.encrypted == Some(false) {
        warn!("ignoring encrypted=false override: buckets are always encrypted at rest");
    }
    if let Some(encryption) = ovr.encryption {
        config.encryption = encryption;
    }
    if let Some(key) = &ovr.kms_master_key_id {
        if config.encryption == ServerSideEncryption::AwsKms {
            config.kms_master_key_id = Some(key.clone());
        } else {
            warn!(
                encryption = %config.encryption,
                "ignoring kmsMasterKeyId override: only used with aws:kms encryption"
            );
        }
    }
    if let Some(tiering) = &ovr.intelligent_tiering {
        if let Some(enabled) = tiering.enabled {
            config.tiering.enabled = enabled;
        }
        if let Some(days) = tiering.archive_access_tier_days {
            config.tiering.archive_after_days = days;
        }
        if let Some(days) = tiering.deep_archive_access_tier_days {
            config.tiering.deep_archive_after_days = days;
        }
    }
    if let Some(lifecycle) = &ovr.lifecycle {
        if let Some(days) = lifecycle.transition_to_intelligent_tiering_days {
            config.lifecycle.transition_to_tiering_days = days;
        }
        if let Some(days) = lifecycle.noncurrent_version_expiration_days {
            config.lifecycle.noncurrent_version_expiration_days = days;
        }
    }

    config
}
