//! Resource properties for `AWS::S3::Bucket` and `AWS::S3::BucketPolicy`.
//!
//! Field names follow the CloudFormation resource reference. Where its
//! capitalization differs from plain PascalCase (`SSEAlgorithm`,
//! `KMSMasterKeyID`) the field carries an explicit rename.
#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

use crate::bucket::ServerSideEncryption;
use crate::policy::PolicyDocument;
use crate::template::Intrinsic;

/// CloudFormation type of the storage bucket.
pub const BUCKET_RESOURCE_TYPE: &str = "AWS::S3::Bucket";

/// CloudFormation type of the bucket policy.
pub const BUCKET_POLICY_RESOURCE_TYPE: &str = "AWS::S3::BucketPolicy";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// `Enabled` / `Disabled` status used by tiering and lifecycle rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Enabled,
    Disabled,
}

impl From<bool> for Status {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Intelligent tiering access tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessTier {
    #[serde(rename = "ARCHIVE_ACCESS")]
    ArchiveAccess,
    #[serde(rename = "DEEP_ARCHIVE_ACCESS")]
    DeepArchiveAccess,
}

/// Storage class a lifecycle transition moves objects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionStorageClass {
    #[serde(rename = "INTELLIGENT_TIERING")]
    IntelligentTiering,
}

// ---------------------------------------------------------------------------
// AWS::S3::Bucket
// ---------------------------------------------------------------------------

/// Properties of an `AWS::S3::Bucket`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    pub bucket_encryption: BucketEncryption,
    pub public_access_block_configuration: PublicAccessBlockConfiguration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versioning_configuration: Option<VersioningConfiguration>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub intelligent_tiering_configurations: Vec<IntelligentTieringConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_configuration: Option<LifecycleConfiguration>,
}

/// Bucket default encryption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketEncryption {
    pub server_side_encryption_configuration: Vec<ServerSideEncryptionRule>,
}

/// One default encryption rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerSideEncryptionRule {
    pub server_side_encryption_by_default: ServerSideEncryptionByDefault,
}

/// Default encryption algorithm and key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSideEncryptionByDefault {
    #[serde(rename = "SSEAlgorithm")]
    pub sse_algorithm: ServerSideEncryption,
    #[serde(
        rename = "KMSMasterKeyID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub kms_master_key_id: Option<String>,
}

/// Public access block; BucketStack always sets every flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicAccessBlockConfiguration {
    pub block_public_acls: bool,
    pub block_public_policy: bool,
    pub ignore_public_acls: bool,
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlockConfiguration {
    /// Every flag set.
    pub const BLOCK_ALL: Self = Self {
        block_public_acls: true,
        block_public_policy: true,
        ignore_public_acls: true,
        restrict_public_buckets: true,
    };

    /// Whether all public access is blocked.
    #[must_use]
    pub fn blocks_all(&self) -> bool {
        *self == Self::BLOCK_ALL
    }
}

/// Versioning state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersioningConfiguration {
    pub status: VersioningStatus,
}

/// Bucket versioning status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersioningStatus {
    Enabled,
    Suspended,
}

/// One intelligent tiering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IntelligentTieringConfiguration {
    pub id: String,
    pub status: Status,
    pub tierings: Vec<Tiering>,
}

/// Access tier and the days without access before objects enter it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tiering {
    pub access_tier: AccessTier,
    pub days: u32,
}

/// Lifecycle rules of a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleConfiguration {
    pub rules: Vec<LifecycleRule>,
}

/// One lifecycle rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<Transition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noncurrent_version_expiration: Option<NoncurrentVersionExpiration>,
}

/// Move current objects to another storage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transition {
    pub storage_class: TransitionStorageClass,
    pub transition_in_days: u32,
}

/// Expire noncurrent object versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NoncurrentVersionExpiration {
    pub noncurrent_days: u32,
}

// ---------------------------------------------------------------------------
// AWS::S3::BucketPolicy
// ---------------------------------------------------------------------------

/// Properties of an `AWS::S3::BucketPolicy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketPolicyProperties {
    /// The bucket the policy is attached to.
    pub bucket: Intrinsic,
    /// The policy.
    pub policy_document: PolicyDocument,
}
