//! Named configuration presets per bucket category.

use bucketstack_model::{
    BucketCategory, BucketConfig, LifecyclePolicy, RemovalPolicy, ServerSideEncryption,
    TieringPolicy,
};

/// Preset for media buckets: versioned, 90/180 day tiering, 30/90 day lifecycle.
#[must_use]
pub fn media() -> BucketConfig {
    preset_record(true, (90, 180), (30, 90))
}

/// Preset for document buckets: versioned, 60/120 day tiering, 15/60 day lifecycle.
#[must_use]
pub fn document() -> BucketConfig {
    preset_record(true, (60, 120), (15, 60))
}

/// Preset for log buckets: unversioned, 30/90 day tiering, 7/30 day lifecycle.
#[must_use]
pub fn log() -> BucketConfig {
    preset_record(false, (30, 90), (7, 30))
}

/// The preset for `category`, or `None` for [`BucketCategory::Custom`].
///
/// # Examples
///
/// ```
/// use bucketstack_model::BucketCategory;
/// use bucketstack_synth::preset;
///
/// let log = preset(BucketCategory::Log).unwrap();
/// assert!(!log.versioned);
/// assert!(preset(BucketCategory::Custom).is_none());
/// ```
#[must_use]
pub fn preset(category: BucketCategory) -> Option<BucketConfig> {
    match category {
        BucketCategory::Media => Some(media()),
        BucketCategory::Document => Some(document()),
        BucketCategory::Log => Some(log()),
        BucketCategory::Custom => None,
    }
}

fn preset_record(versioned: bool, tiering: (u32, u32), lifecycle: (u32, u32)) -> BucketConfig {
    BucketConfig {
        name: None,
        versioned,
        encrypted: true,
        encryption: ServerSideEncryption::Aes256,
        kms_master_key_id: None,
        tiering: TieringPolicy {
            enabled: true,
            archive_after_days: tiering.0,
            deep_archive_after_days: tiering.1,
        },
        lifecycle: LifecyclePolicy {
            transition_to_tiering_days: lifecycle.0,
            noncurrent_version_expiration_days: lifecycle.1,
        },
        retention: RemovalPolicy::Destroy,
    }
}
