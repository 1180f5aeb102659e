//! Context resolution.
//!
//! Context is a flat map of string keys to JSON values, gathered from three
//! sources. Later sources win:
//!
//! 1. environment variables, `BUCKETSTACK_<KEY>` with the key in
//!    SCREAMING_SNAKE_CASE (`bucketType` -> `BUCKETSTACK_BUCKET_TYPE`)
//! 2. a context file, either `{"context": {...}}` as in `cdk.json` or a flat
//!    object
//! 3. `key=value` pairs from the command line
//!
//! [`AppContext::resolve`] turns the merged map into stack inputs, filling
//! in the naming defaults.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;
use bucketstack_core::{BucketStackError, BucketStackResult};
use bucketstack_model::{AccessGrant, BucketCategory, BucketConfigOverride};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::retention::is_production;
use crate::stack::{StackProps, default_description};

/// Known context keys.
pub mod keys {
    /// Deployment environment label.
    pub const ENVIRONMENT: &str = "environment";
    /// Bucket category.
    pub const BUCKET_TYPE: &str = "bucketType";
    /// Explicit bucket name.
    pub const BUCKET_NAME: &str = "bucketName";
    /// Template description.
    pub const DESCRIPTION: &str = "description";
    /// Stack name.
    pub const STACK_NAME: &str = "stackName";
    /// Bucket configuration override, as JSON.
    pub const BUCKET_CONFIG: &str = "bucketConfig";
    /// Principals granted read access.
    pub const READ_ACCESS_PRINCIPALS: &str = "readAccessPrincipals";
    /// Principals granted write access.
    pub const WRITE_ACCESS_PRINCIPALS: &str = "writeAccessPrincipals";

    /// Every key, in documentation order.
    pub const ALL: [&str; 8] = [
        ENVIRONMENT,
        BUCKET_TYPE,
        BUCKET_NAME,
        DESCRIPTION,
        STACK_NAME,
        BUCKET_CONFIG,
        READ_ACCESS_PRINCIPALS,
        WRITE_ACCESS_PRINCIPALS,
    ];
}

/// Prefix of context environment variables.
pub const ENV_PREFIX: &str = "BUCKETSTACK_";

/// Environment label used when none is given.
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Raw context values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(BTreeMap<String, Value>);

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a raw value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of keys set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no key is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay `other` on top of this context; its values win.
    pub fn merge(&mut self, other: Context) {
        self.0.extend(other.0);
    }

    /// Read the known keys from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the known keys through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut context = Self::new();
        for key in keys::ALL {
            if let Some(value) = lookup(&env_var_name(key)).filter(|v| !v.is_empty()) {
                context.set(key, value);
            }
        }
        context
    }

    /// Parse a context document.
    ///
    /// # Errors
    /// Returns a configuration error if `json` is not a JSON object, or its
    /// `context` member is not one.
    pub fn from_json_str(json: &str) -> BucketStackResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| invalid("context", e))?;
        let Value::Object(mut object) = value else {
            return Err(invalid("context", "context document must be a JSON object"));
        };
        match object.remove("context") {
            Some(Value::Object(nested)) => Ok(Self(nested.into_iter().collect())),
            Some(_) => Err(invalid("context", "'context' member must be a JSON object")),
            None => Ok(Self(object.into_iter().collect())),
        }
    }

    /// Read a context file.
    ///
    /// # Errors
    /// Returns an internal error if the file cannot be read, or a
    /// configuration error if its content is malformed.
    pub fn from_file(path: &Path) -> BucketStackResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read context file {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Parse `key=value` pairs.
    ///
    /// # Errors
    /// Returns a configuration error for a pair without `=` or with an empty
    /// key.
    pub fn from_pairs<I, S>(pairs: I) -> BucketStackResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut context = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let Some((key, value)) = pair.split_once('=') else {
                return Err(invalid(pair, "expected key=value"));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(invalid(pair, "context key must not be empty"));
            }
            context.set(key, value);
        }
        Ok(context)
    }

    /// A scalar value as a string. Empty strings and `null` count as unset.
    ///
    /// # Errors
    /// Returns a configuration error for arrays and objects.
    pub fn get_str(&self, key: &str) -> BucketStackResult<Option<String>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.trim().to_owned()).filter(|s| !s.is_empty())),
            Some(v @ (Value::Bool(_) | Value::Number(_))) => Ok(Some(v.to_string())),
            Some(_) => Err(invalid(key, "expected a string")),
        }
    }

    fn bucket_config(&self) -> BucketStackResult<Option<BucketConfigOverride>> {
        let key = keys::BUCKET_CONFIG;
        let parsed = match self.get(key) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
            Some(Value::String(s)) => serde_json::from_str(s),
            Some(v @ Value::Object(_)) => serde_json::from_value(v.clone()),
            Some(_) => return Err(invalid(key, "expected a JSON object")),
        };
        parsed.map(Some).map_err(|e| invalid(key, e))
    }

    fn principals(&self, key: &str) -> BucketStackResult<Vec<String>> {
        let items = match self.get(key) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::String(s)) if s.trim_start().starts_with('[') => {
                serde_json::from_str::<Vec<String>>(s).map_err(|e| invalid(key, e))?
            }
            Some(Value::String(s)) => s.split(',').map(str::to_owned).collect(),
            Some(Value::Array(values)) => values
                .iter()
                .map(|v| {
                    v.as_str()
                        .map(str::to_owned)
                        .ok_or_else(|| invalid(key, "principals must be strings"))
                })
                .collect::<BucketStackResult<_>>()?,
            Some(_) => return Err(invalid(key, "expected a list of principals")),
        };
        Ok(items
            .into_iter()
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty())
            .collect())
    }
}

/// Stack inputs resolved from context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    /// Environment label as given; drives retention.
    pub raw_environment: String,
    /// Environment label used in names; production labels become `prod`.
    pub environment: String,
    /// Bucket category.
    pub category: BucketCategory,
    /// Stack name.
    pub stack_name: String,
    /// Bucket name, unless CloudFormation should pick one.
    pub bucket_name: Option<String>,
    /// Template description.
    pub description: String,
    /// Bucket configuration override.
    pub override_config: Option<BucketConfigOverride>,
    /// Read grants followed by write grants.
    pub grants: Vec<AccessGrant>,
}

impl AppContext {
    /// Resolve `context` into stack inputs.
    ///
    /// `now` stamps the generated bucket name. No name is generated when
    /// `generate_name` is unset or the `bucketConfig` override names the
    /// bucket itself.
    ///
    /// # Errors
    /// Returns a configuration error for an unknown bucket type or a
    /// malformed context value.
    pub fn resolve(
        context: &Context,
        now: DateTime<Utc>,
        generate_name: bool,
    ) -> BucketStackResult<Self> {
        let raw_environment = context
            .get_str(keys::ENVIRONMENT)?
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_owned());
        let environment = if is_production(&raw_environment) {
            "prod".to_owned()
        } else {
            raw_environment.clone()
        };

        let category = match context.get_str(keys::BUCKET_TYPE)? {
            Some(raw) => {
                BucketCategory::parse(&raw).ok_or(BucketStackError::UnknownBucketType(raw))?
            }
            None => BucketCategory::Media,
        };

        let stack_name = context
            .get_str(keys::STACK_NAME)?
            .unwrap_or_else(|| format!("{category}-storage-bucket-{environment}"));

        let override_config = context.bucket_config()?;
        let override_names_bucket = override_config
            .as_ref()
            .and_then(|o| o.bucket_name.as_deref())
            .is_some_and(|n| !n.is_empty());

        let bucket_name = match context.get_str(keys::BUCKET_NAME)? {
            Some(name) => Some(name),
            None if generate_name && !override_names_bucket => Some(
                format!(
                    "{category}-storage-{environment}-{}",
                    now.format("%Y%m%d-%H%M%S")
                )
                .to_lowercase(),
            ),
            None => None,
        };

        let description = context
            .get_str(keys::DESCRIPTION)?
            .unwrap_or_else(|| default_description(category));

        let grants = context
            .principals(keys::READ_ACCESS_PRINCIPALS)?
            .into_iter()
            .map(AccessGrant::read)
            .chain(
                context
                    .principals(keys::WRITE_ACCESS_PRINCIPALS)?
                    .into_iter()
                    .map(AccessGrant::write),
            )
            .collect();

        let resolved = Self {
            raw_environment,
            environment,
            category,
            stack_name,
            bucket_name,
            description,
            override_config,
            grants,
        };
        debug!(
            stack = %resolved.stack_name,
            environment = %resolved.environment,
            category = %resolved.category,
            bucket = ?resolved.bucket_name,
            "resolved context"
        );
        Ok(resolved)
    }

    /// Stack inputs for [`assemble`](crate::assemble).
    #[must_use]
    pub fn to_stack_props(&self) -> StackProps {
        StackProps {
            stack_name: self.stack_name.clone(),
            category: self.category,
            bucket_name: self.bucket_name.clone(),
            description: Some(self.description.clone()),
            environment: Some(self.raw_environment.clone()),
            override_config: self.override_config.clone(),
            grants: self.grants.clone(),
        }
    }
}

/// Environment variable carrying context `key`.
#[must_use]
pub fn env_var_name(key: &str) -> String {
    let mut name = String::from(ENV_PREFIX);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('_');
        }
        name.push(c.to_ascii_uppercase());
    }
    name
}

fn invalid(key: &str, reason: impl ToString) -> BucketStackError {
    BucketStackError::InvalidContext {
        key: key.to_owned(),
        reason: reason.to_string(),
    }
}
