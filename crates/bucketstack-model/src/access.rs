//! Access grants attached to a bucket.

use serde::{Deserialize, Serialize};

/// What a grant permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    /// List the bucket and get objects.
    Read,
    /// Put objects.
    Write,
}

impl AccessMode {
    /// Returns the string value of this mode.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }

    /// S3 actions granted by this mode.
    #[must_use]
    pub fn actions(&self) -> &'static [&'static str] {
        match self {
            Self::Read => &["s3:GetObject*", "s3:GetBucket*", "s3:List*"],
            Self::Write => &[
                "s3:PutObject",
                "s3:PutObjectLegalHold",
                "s3:PutObjectRetention",
                "s3:PutObjectTagging",
                "s3:PutObjectVersionTagging",
                "s3:Abort*",
            ],
        }
    }
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission for one principal on the bucket.
///
/// The principal is kept as the raw reference the caller supplied; it is
/// parsed and validated when the access policy is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessGrant {
    /// IAM ARN, 12-digit account id, or service principal.
    pub principal: String,
    /// Read or write.
    pub mode: AccessMode,
}

impl AccessGrant {
    /// A read grant for `principal`.
    #[must_use]
    pub fn read(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            mode: AccessMode::Read,
        }
    }

    /// A write grant for `principal`.
    #[must_use]
    pub fn write(principal: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            mode: AccessMode::Write,
        }
    }
}
