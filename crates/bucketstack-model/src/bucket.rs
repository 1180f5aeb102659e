//! Bucket configuration records.
//!
//! A [`BucketConfig`] is the fully resolved description of one storage
//! bucket. It is produced once per synthesis by merging a category preset
//! with an optional [`BucketConfigOverride`] supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::template::DeletionPolicy;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Bucket category, selecting which preset applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketCategory {
    /// Images, audio and video.
    Media,
    /// Office documents and other user content.
    Document,
    /// Application and access logs.
    Log,
    /// Caller supplied configuration; no preset.
    Custom,
}

impl BucketCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 4] = [Self::Media, Self::Document, Self::Log, Self::Custom];

    /// Returns the context string for this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Media => "media",
            Self::Document => "document",
            Self::Log => "log",
            Self::Custom => "custom",
        }
    }

    /// Parse a category, ignoring ASCII case and surrounding whitespace.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for BucketCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether stack teardown keeps or removes the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    /// Keep the bucket and its contents.
    Retain,
    /// Remove the bucket with the stack.
    #[default]
    Destroy,
}

impl RemovalPolicy {
    /// Returns the string value of this policy.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retain => "retain",
            Self::Destroy => "destroy",
        }
    }

    /// The CloudFormation deletion policy implementing this disposition.
    #[must_use]
    pub fn deletion_policy(&self) -> DeletionPolicy {
        match self {
            Self::Retain => DeletionPolicy::Retain,
            Self::Destroy => DeletionPolicy::Delete,
        }
    }
}

impl std::fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// S3 server-side encryption algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ServerSideEncryption {
    /// S3 managed keys.
    #[default]
    #[serde(rename = "AES256")]
    Aes256,
    /// KMS managed keys.
    #[serde(rename = "aws:kms")]
    AwsKms,
}

impl ServerSideEncryption {
    /// Returns the string value of this enum variant.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256 => "AES256",
            Self::AwsKms => "aws:kms",
        }
    }
}

impl std::fmt::Display for ServerSideEncryption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Resolved records
// ---------------------------------------------------------------------------

/// Intelligent tiering thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieringPolicy {
    /// Whether the tiering configuration is active.
    pub enabled: bool,
    /// Days without access before objects move to the archive access tier.
    pub archive_after_days: u32,
    /// Days without access before objects move to the deep archive access tier.
    pub deep_archive_after_days: u32,
}

impl Default for TieringPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            archive_after_days: 90,
            deep_archive_after_days: 180,
        }
    }
}

/// Lifecycle rule thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecyclePolicy {
    /// Days after creation before objects transition to intelligent tiering.
    pub transition_to_tiering_days: u32,
    /// Days after becoming noncurrent before object versions expire.
    pub noncurrent_version_expiration_days: u32,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            transition_to_tiering_days: 30,
            noncurrent_version_expiration_days: 90,
        }
    }
}

/// Fully resolved configuration of one storage bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketConfig {
    /// Physical bucket name; `None` lets CloudFormation generate one.
    pub name: Option<String>,
    /// Whether object versioning is enabled.
    pub versioned: bool,
    /// Whether server-side encryption is enabled.
    pub encrypted: bool,
    /// Server-side encryption algorithm.
    pub encryption: ServerSideEncryption,
    /// KMS key used with [`ServerSideEncryption::AwsKms`].
    pub kms_master_key_id: Option<String>,
    /// Intelligent tiering thresholds.
    pub tiering: TieringPolicy,
    /// Lifecycle thresholds.
    pub lifecycle: LifecyclePolicy,
    /// Teardown disposition.
    pub retention: RemovalPolicy,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            name: None,
            versioned: true,
            encrypted: true,
            encryption: ServerSideEncryption::Aes256,
            kms_master_key_id: None,
            tiering: TieringPolicy::default(),
            lifecycle: LifecyclePolicy::default(),
            retention: RemovalPolicy::Destroy,
        }
    }
}

// ---------------------------------------------------------------------------
// Caller overrides
// ---------------------------------------------------------------------------

/// Partial bucket configuration supplied by the caller.
///
/// Every field is optional; unset fields fall back to the base record the
/// override is merged into. The JSON shape is camelCase:
///
/// ```json
/// {
///   "bucketName": "my-bucket",
///   "versioned": false,
///   "intelligentTiering": { "archiveAccessTierDays": 120 },
///   "lifecycle": { "noncurrentVersionExpirationDays": 45 }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BucketConfigOverride {
    /// Physical bucket name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    /// Object versioning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versioned: Option<bool>,
    /// Server-side encryption; encryption is always forced on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted: Option<bool>,
    /// Encryption algorithm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<ServerSideEncryption>,
    /// KMS key for `aws:kms` encryption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kms_master_key_id: Option<String>,
    /// Tiering thresholds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intelligent_tiering: Option<TieringOverride>,
    /// Lifecycle thresholds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<LifecycleOverride>,
}

/// Partial [`TieringPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TieringOverride {
    /// Whether tiering is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Days until the archive access tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_access_tier_days: Option<u32>,
    /// Days until the deep archive access tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deep_archive_access_tier_days: Option<u32>,
}

/// Partial [`LifecyclePolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LifecycleOverride {
    /// Days until transition to intelligent tiering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_to_intelligent_tiering_days: Option<u32>,
    /// Days until noncurrent versions expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noncurrent_version_expiration_days: Option<u32>,
}
