//! Retention disposition from the deployment environment.

use bucketstack_model::RemovalPolicy;

/// Substring marking a production-like environment label.
const PRODUCTION_MARKER: &str = "prod";

/// Whether `environment` names a production-like environment.
#[must_use]
pub fn is_production(environment: &str) -> bool {
    environment
        .to_ascii_lowercase()
        .contains(PRODUCTION_MARKER)
}

/// Map an environment label to a retention disposition.
///
/// Any label containing `prod` (ignoring case) retains the bucket on
/// teardown; everything else, including an absent label, destroys it.
///
/// # Examples
///
/// ```
/// use bucketstack_model::RemovalPolicy;
/// use bucketstack_synth::resolve_retention;
///
/// assert_eq!(resolve_retention(Some("Production")), RemovalPolicy::Retain);
/// assert_eq!(resolve_retention(None), RemovalPolicy::Destroy);
/// ```
#[must_use]
pub fn resolve_retention(environment: Option<&str>) -> RemovalPolicy {
    match environment {
        Some(env) if is_production(env) => RemovalPolicy::Retain,
        _ => RemovalPolicy::Destroy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_retain_production_labels() {
        assert_eq!(resolve_retention(Some("prod")), RemovalPolicy::Retain);
        assert_eq!(resolve_retention(Some("Production")), RemovalPolicy::Retain);
        assert_eq!(resolve_retention(Some("eu-PROD-2")), RemovalPolicy::Retain);
        assert_eq!(resolve_retention(Some("preprod")), RemovalPolicy::Retain);
    }

    #[test]
    fn test_should_destroy_everything_else() {
        assert_eq!(resolve_retention(Some("dev")), RemovalPolicy::Destroy);
        assert_eq!(resolve_retention(Some("")), RemovalPolicy::Destroy);
        assert_eq!(resolve_retention(Some("staging")), RemovalPolicy::Destroy);
        assert_eq!(resolve_retention(None), RemovalPolicy::Destroy);
    }
}
