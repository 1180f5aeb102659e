//! AWS account and region identifiers that make up a stack environment.

use std::fmt;

use crate::BucketStackError;

/// AWS Account ID (12-digit string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create a new account ID from a string.
    ///
    /// # Errors
    /// Returns an error if the account ID is not a 12-digit numeric string.
    pub fn new(id: impl Into<String>) -> Result<Self, BucketStackError> {
        let id = id.into();
        if !is_account_id(&id) {
            return Err(BucketStackError::InvalidAccountId(id));
        }
        Ok(Self(id))
    }

    /// Get the account ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The ARN of the account root principal.
    #[must_use]
    pub fn root_arn(&self) -> String {
        format!("arn:aws:iam::{}:root", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether `id` is a 12-digit numeric string.
fn is_account_id(id: &str) -> bool {
    id.len() == 12 && id.chars().all(|c| c.is_ascii_digit())
}

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Target environment of a stack.
///
/// Both halves are optional: a stack synthesized without an account or
/// region is environment-agnostic and deploys wherever the toolchain points
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StackEnvironment {
    /// Target account.
    pub account: Option<AccountId>,
    /// Target region.
    pub region: Option<AwsRegion>,
}

impl StackEnvironment {
    /// Placeholder used for an unset account.
    pub const UNKNOWN_ACCOUNT: &str = "unknown-account";

    /// Placeholder used for an unset region.
    pub const UNKNOWN_REGION: &str = "unknown-region";

    /// Build an environment from optional raw account and region strings.
    ///
    /// # Errors
    /// Returns an error if the account is set but not a valid account ID.
    pub fn from_parts(
        account: Option<&str>,
        region: Option<&str>,
    ) -> Result<Self, BucketStackError> {
        let account = account
            .filter(|a| !a.is_empty())
            .map(AccountId::new)
            .transpose()?;
        let region = region.filter(|r| !r.is_empty()).map(AwsRegion::new);
        Ok(Self { account, region })
    }

    /// Render as an `aws://<account>/<region>` environment URI.
    #[must_use]
    pub fn uri(&self) -> String {
        format!(
            "aws://{}/{}",
            self.account
                .as_ref()
                .map_or(Self::UNKNOWN_ACCOUNT, AccountId::as_str),
            self.region
                .as_ref()
                .map_or(Self::UNKNOWN_REGION, AwsRegion::as_str),
        )
    }
}
