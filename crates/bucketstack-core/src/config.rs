//! Process configuration for BucketStack.
//!
//! Provides [`BucketStackConfig`], which controls how a synthesis run logs and
//! where it writes its output. Values are loaded from environment variables,
//! following the conventions of the CDK toolchain for the target environment.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{BucketStackResult, StackEnvironment};

/// BucketStack process configuration.
///
/// # Examples
///
/// ```
/// use bucketstack_core::BucketStackConfig;
///
/// let config = BucketStackConfig::default();
/// assert_eq!(config.log_level, "info");
/// assert!(config.output_dir.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct BucketStackConfig {
    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Directory the cloud assembly is written to. `None` prints the template
    /// to stdout instead.
    #[builder(default)]
    pub output_dir: Option<String>,

    /// Target account for the stack environment.
    #[builder(default)]
    pub default_account: Option<String>,

    /// Target region for the stack environment.
    #[builder(default)]
    pub default_region: Option<String>,

    /// Whether the template is pretty-printed.
    #[builder(default = true)]
    pub pretty: bool,
}

impl Default for BucketStackConfig {
    fn default() -> Self {
        Self {
            log_level: String::from("info"),
            output_dir: None,
            default_account: None,
            default_region: None,
            pretty: true,
        }
    }
}

impl BucketStackConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `LOG_LEVEL` | `info` |
    /// | `BUCKETSTACK_OUTPUT_DIR` | *(unset, template goes to stdout)* |
    /// | `CDK_DEFAULT_ACCOUNT` | *(unset)* |
    /// | `CDK_DEFAULT_REGION` | *(unset)* |
    /// | `BUCKETSTACK_PRETTY` | `true` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// [`from_env`](Self::from_env) is this function over the process
    /// environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("BUCKETSTACK_OUTPUT_DIR") {
            config.output_dir = Some(v).filter(|v| !v.is_empty());
        }
        if let Some(v) = lookup("CDK_DEFAULT_ACCOUNT") {
            config.default_account = Some(v).filter(|v| !v.is_empty());
        }
        if let Some(v) = lookup("CDK_DEFAULT_REGION") {
            config.default_region = Some(v).filter(|v| !v.is_empty());
        }
        if let Some(v) = lookup("BUCKETSTACK_PRETTY") {
            config.pretty = parse_bool(&v);
        }

        config
    }

    /// The stack environment described by this configuration.
    ///
    /// # Errors
    /// Returns a validation error if the configured account is malformed.
    pub fn stack_environment(&self) -> BucketStackResult<StackEnvironment> {
        StackEnvironment::from_parts(
            self.default_account.as_deref(),
            self.default_region.as_deref(),
        )
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
#[must_use]
pub fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
