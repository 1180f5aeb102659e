//! Template-level integration tests for BucketStack.
//!
//! Each test synthesizes a full stack from context pairs, exactly as the CLI
//! does, and asserts on the rendered CloudFormation JSON.
//!
//! ```text
//! cargo test -p bucketstack-integration
//! ```

use std::sync::Once;

use bucketstack_core::BucketStackResult;
use bucketstack_synth::{AppContext, Context, assemble};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Fixed synthesis time, so generated bucket names are stable.
#[must_use]
pub fn synth_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Synthesize the template for `pairs` (`key=value` context values).
///
/// # Errors
/// Returns the synthesis error unchanged.
pub fn try_synth(pairs: &[&str]) -> BucketStackResult<Value> {
    init_tracing();

    let context = Context::from_pairs(pairs)?;
    let app = AppContext::resolve(&context, synth_time(), true)?;
    let template = assemble(&app.to_stack_props())?.to_template()?;
    Ok(serde_json::to_value(&template)?)
}

/// Synthesize the template for `pairs`, panicking on failure.
#[must_use]
pub fn synth(pairs: &[&str]) -> Value {
    try_synth(pairs).unwrap_or_else(|e| panic!("synthesis failed for {pairs:?}: {e}"))
}

/// Resources of `resource_type`.
#[must_use]
pub fn resources_of_type<'a>(template: &'a Value, resource_type: &str) -> Vec<&'a Value> {
    template["Resources"]
        .as_object()
        .map(|resources| {
            resources
                .values()
                .filter(|r| r["Type"] == resource_type)
                .collect()
        })
        .unwrap_or_default()
}

/// Number of resources of `resource_type`.
#[must_use]
pub fn resource_count_is(template: &Value, resource_type: &str) -> usize {
    resources_of_type(template, resource_type).len()
}

/// Whether some resource of `resource_type` has properties matching
/// `expected`.
///
/// Objects match when every expected key matches; arrays and scalars must
/// match exactly, element by element.
#[must_use]
pub fn has_resource_properties(template: &Value, resource_type: &str, expected: &Value) -> bool {
    resources_of_type(template, resource_type)
        .into_iter()
        .any(|r| object_like(&r["Properties"], expected))
}

fn object_like(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => expected
            .iter()
            .all(|(k, v)| actual.get(k).is_some_and(|a| object_like(a, v))),
        (Value::Array(actual), Value::Array(expected)) => {
            actual.len() == expected.len()
                && actual.iter().zip(expected).all(|(a, e)| object_like(a, e))
        }
        _ => actual == expected,
    }
}

mod test_bucket;
mod test_context;
mod test_outputs;
mod test_policy;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_should_match_partial_objects() {
        let actual = json!({"A": {"B": 1, "C": 2}, "D": [1, 2]});
        assert!(object_like(&actual, &json!({"A": {"B": 1}})));
        assert!(!object_like(&actual, &json!({"A": {"B": 2}})));
        assert!(!object_like(&actual, &json!({"D": [1]})));
        assert!(!object_like(&actual, &json!({"E": null})));
    }
}
