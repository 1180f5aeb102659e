//! Error types for BucketStack.
//!
//! Every failure during synthesis falls into one of two domain categories:
//! configuration errors (the caller asked for something the stack cannot
//! derive, such as a `custom` bucket without an override) and validation
//! errors (a supplied value is malformed). Anything else, such as I/O while
//! writing the cloud assembly, is carried as [`BucketStackError::Internal`].

/// Coarse error category, used by the CLI to pick an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The requested stack cannot be configured.
    Configuration,
    /// A supplied value is malformed.
    Validation,
    /// Serialization, I/O or other unexpected failures.
    Internal,
}

/// Error type for BucketStack synthesis.
#[derive(Debug, thiserror::Error)]
pub enum BucketStackError {
    // -----------------------------------------------------------------------
    // Configuration errors
    // -----------------------------------------------------------------------
    /// The `custom` category was requested without a configuration override.
    #[error("configuration error: bucket type '{category}' requires a bucket configuration override")]
    MissingOverride {
        /// The category that needs an override.
        category: String,
    },

    /// The bucket type is not one of the known categories.
    #[error("configuration error: unknown bucket type '{0}' (expected media, document, log or custom)")]
    UnknownBucketType(String),

    /// A context value could not be interpreted.
    #[error("configuration error: invalid context value for '{key}': {reason}")]
    InvalidContext {
        /// The context key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    // -----------------------------------------------------------------------
    // Validation errors
    // -----------------------------------------------------------------------
    /// A grant principal is not a recognizable identity reference.
    #[error("validation error: invalid principal '{principal}': {reason}")]
    InvalidPrincipal {
        /// The rejected principal reference.
        principal: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The bucket name violates the S3 naming rules.
    #[error("validation error: invalid bucket name '{name}': {reason}")]
    InvalidBucketName {
        /// The rejected bucket name.
        name: String,
        /// The rule that was violated.
        reason: String,
    },

    /// The stack name is not a valid CloudFormation stack name.
    #[error("validation error: invalid stack name '{name}': {reason}")]
    InvalidStackName {
        /// The rejected stack name.
        name: String,
        /// The rule that was violated.
        reason: String,
    },

    /// The deep archive tier would be reached before the archive tier.
    #[error(
        "validation error: deep archive tier ({deep_archive_days} days) must not precede archive tier ({archive_days} days)"
    )]
    InvalidTiering {
        /// Days until the archive access tier.
        archive_days: u32,
        /// Days until the deep archive access tier.
        deep_archive_days: u32,
    },

    /// Invalid AWS account ID format.
    #[error("validation error: invalid AWS account ID: {0} (must be 12-digit numeric string)")]
    InvalidAccountId(String),

    // -----------------------------------------------------------------------
    // Everything else
    // -----------------------------------------------------------------------
    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BucketStackError {
    /// The coarse category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingOverride { .. }
            | Self::UnknownBucketType(_)
            | Self::InvalidContext { .. } => ErrorKind::Configuration,
            Self::InvalidPrincipal { .. }
            | Self::InvalidBucketName { .. }
            | Self::InvalidStackName { .. }
            | Self::InvalidTiering { .. }
            | Self::InvalidAccountId(_) => ErrorKind::Validation,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether this is a configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Whether this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl From<serde_json::Error> for BucketStackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(err.into())
    }
}

/// Convenience result type for BucketStack operations.
pub type BucketStackResult<T> = Result<T, BucketStackError>;
