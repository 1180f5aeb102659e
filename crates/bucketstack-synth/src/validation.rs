//! Validation of caller supplied values.
//!
//! Bucket names follow the rules in the
//! [Amazon S3 documentation](https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html);
//! principals must be recognizable IAM identity references.

use std::net::Ipv4Addr;
use std::sync::LazyLock;

use bucketstack_core::{AccountId, BucketStackError, BucketStackResult};
use bucketstack_model::{PolicyPrincipal, TieringPolicy};
use regex::Regex;

/// Bucket name length bounds.
const BUCKET_NAME_LEN: std::ops::RangeInclusive<usize> = 3..=63;

/// Prefixes S3 reserves for internal use.
const RESERVED_BUCKET_PREFIXES: [&str; 2] = ["xn--", "sthree-"];

/// Suffixes S3 reserves for access point aliases.
const RESERVED_BUCKET_SUFFIXES: [&str; 2] = ["-s3alias", "--ol-s3"];

/// Maximum CloudFormation stack name length.
const MAX_STACK_NAME_LEN: usize = 128;

/// CloudFormation stack name: a letter, then letters, digits and hyphens.
static STACK_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("stack name pattern is valid")
});

/// IAM or STS identity ARN in any partition.
static IDENTITY_ARN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^arn:aws(-cn|-us-gov)?:(iam|sts)::\d{12}:(root|[A-Za-z-]+/[\w+=,.@/-]+)$")
        .expect("identity ARN pattern is valid")
});

/// AWS service principal, e.g. `lambda.amazonaws.com`.
static SERVICE_PRINCIPAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9-]+(\.[a-z0-9-]+)*\.amazonaws\.com(\.cn)?$")
        .expect("service principal pattern is valid")
});

fn invalid_name(name: &str, reason: impl Into<String>) -> BucketStackError {
    BucketStackError::InvalidBucketName {
        name: name.to_owned(),
        reason: reason.into(),
    }
}

/// Validate an S3 bucket name against the general purpose bucket naming
/// rules: 3 to 63 lowercase letters, digits, hyphens and dots, alphanumeric
/// at both ends, no `..`, not an IPv4 address, and none of the reserved
/// prefixes or suffixes.
///
/// # Errors
///
/// Returns [`BucketStackError::InvalidBucketName`] naming the first rule
/// the name breaks.
///
/// # Examples
///
/// ```
/// use bucketstack_synth::validation::validate_bucket_name;
///
/// assert!(validate_bucket_name("media-storage-prod").is_ok());
/// assert!(validate_bucket_name("AB").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> BucketStackResult<()> {
    if !BUCKET_NAME_LEN.contains(&name.len()) {
        return Err(invalid_name(
            name,
            format!(
                "length {} is outside {}..={}",
                name.len(),
                BUCKET_NAME_LEN.start(),
                BUCKET_NAME_LEN.end()
            ),
        ));
    }

    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    if let Some(c) = name.chars().find(|&c| !(allowed(c) || c == '-' || c == '.')) {
        return Err(invalid_name(
            name,
            format!("character {c:?} is not a lowercase letter, digit, '-' or '.'"),
        ));
    }
    if !name.starts_with(allowed) || !name.ends_with(allowed) {
        return Err(invalid_name(name, "must begin and end with a letter or digit"));
    }
    if name.contains("..") {
        return Err(invalid_name(name, "adjacent dots are not allowed"));
    }
    if name.parse::<Ipv4Addr>().is_ok() {
        return Err(invalid_name(name, "looks like an IPv4 address"));
    }
    if let Some(prefix) = RESERVED_BUCKET_PREFIXES.iter().find(|p| name.starts_with(*p)) {
        return Err(invalid_name(name, format!("prefix '{prefix}' is reserved")));
    }
    if let Some(suffix) = RESERVED_BUCKET_SUFFIXES.iter().find(|s| name.ends_with(*s)) {
        return Err(invalid_name(name, format!("suffix '{suffix}' is reserved")));
    }

    Ok(())
}

/// Validate a CloudFormation stack name.
///
/// The name prefixes the output export names and the template file written
/// to the cloud assembly, so it must be a letter followed by letters, digits
/// or hyphens, at most 128 characters.
///
/// # Errors
///
/// Returns [`BucketStackError::InvalidStackName`] otherwise.
///
/// # Examples
///
/// ```
/// use bucketstack_synth::validation::validate_stack_name;
///
/// assert!(validate_stack_name("media-storage-bucket-dev").is_ok());
/// assert!(validate_stack_name("../escaped").is_err());
/// ```
pub fn validate_stack_name(name: &str) -> BucketStackResult<()> {
    let invalid = |reason: String| BucketStackError::InvalidStackName {
        name: name.to_owned(),
        reason,
    };
    if name.len() > MAX_STACK_NAME_LEN {
        return Err(invalid(format!(
            "longer than {MAX_STACK_NAME_LEN} characters"
        )));
    }
    if !STACK_NAME.is_match(name) {
        return Err(invalid(
            "must start with a letter and contain only letters, digits and hyphens".to_owned(),
        ));
    }
    Ok(())
}

/// Parse a principal reference into a policy principal.
///
/// Accepted forms:
/// - an IAM/STS identity ARN (`arn:aws:iam::123456789012:role/reader`)
/// - a 12-digit account id, meaning the account root
/// - a service principal (`lambda.amazonaws.com`)
///
/// The wildcard `*` is rejected: anonymous grants would defeat the blocked
/// public access on the bucket.
///
/// # Errors
///
/// Returns [`BucketStackError::InvalidPrincipal`] for any other input.
pub fn parse_principal(reference: &str) -> BucketStackResult<PolicyPrincipal> {
    let trimmed = reference.trim();
    let invalid = |reason: &str| BucketStackError::InvalidPrincipal {
        principal: reference.to_owned(),
        reason: reason.to_owned(),
    };

    if trimmed.is_empty() {
        return Err(invalid("principal must not be empty"));
    }
    if trimmed == "*" {
        return Err(invalid("anonymous principals cannot be granted access"));
    }
    if trimmed.starts_with("arn:") {
        if IDENTITY_ARN.is_match(trimmed) {
            return Ok(PolicyPrincipal::Aws(trimmed.to_owned()));
        }
        return Err(invalid("not an IAM or STS identity ARN"));
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let account = AccountId::new(trimmed)
            .map_err(|_| invalid("account ids must be 12 digits"))?;
        return Ok(PolicyPrincipal::Aws(account.root_arn()));
    }
    if SERVICE_PRINCIPAL.is_match(trimmed) {
        return Ok(PolicyPrincipal::Service(trimmed.to_owned()));
    }

    Err(invalid(
        "expected an identity ARN, a 12-digit account id, or a service principal",
    ))
}

/// Check that the deep archive tier does not precede the archive tier.
///
/// # Errors
///
/// Returns [`BucketStackError::InvalidTiering`] when it does.
pub fn validate_tiering(tiering: &TieringPolicy) -> BucketStackResult<()> {
    if tiering.deep_archive_after_days < tiering.archive_after_days {
        return Err(BucketStackError::InvalidTiering {
            archive_days: tiering.archive_after_days,
            deep_archive_days: tiering.deep_archive_after_days,
        });
    }
    Ok(())
}
