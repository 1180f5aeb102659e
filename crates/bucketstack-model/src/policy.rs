//! IAM policy documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::template::Intrinsic;

/// IAM policy language version.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Condition block: operator -> (condition key -> value).
pub type Conditions = BTreeMap<String, BTreeMap<String, String>>;

/// An IAM policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// Always [`POLICY_VERSION`].
    pub version: String,
    /// Statements, in evaluation-irrelevant but stable order.
    pub statement: Vec<PolicyStatement>,
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statement: Vec::new(),
        }
    }
}

/// One policy statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    /// Statement id, unique within the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    /// Allow or deny.
    pub effect: Effect,
    /// Who the statement applies to.
    pub principal: PolicyPrincipal,
    /// Actions, wildcards allowed.
    pub action: Vec<String>,
    /// Resource ARNs.
    pub resource: Vec<Intrinsic>,
    /// Conditions under which the statement applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Conditions>,
}

/// Statement effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Permit the actions.
    Allow,
    /// Forbid the actions; wins over any allow.
    Deny,
}

/// Statement principal.
///
/// Serializes as `{"AWS": "<arn>"}` or `{"Service": "<name>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyPrincipal {
    /// An IAM identity ARN, or `*` for anyone.
    #[serde(rename = "AWS")]
    Aws(String),
    /// An AWS service principal such as `lambda.amazonaws.com`.
    Service(String),
}

impl PolicyPrincipal {
    /// The anonymous, any-identity principal.
    #[must_use]
    pub fn any() -> Self {
        Self::Aws("*".to_owned())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_should_serialize_statement() {
        let mut condition = Conditions::new();
        condition.insert(
            "Bool".to_owned(),
            BTreeMap::from([("aws:SecureTransport".to_owned(), "false".to_owned())]),
        );
        let statement = PolicyStatement {
            sid: Some("DenyHttp".to_owned()),
            effect: Effect::Deny,
            principal: PolicyPrincipal::any(),
            action: vec!["s3:*".to_owned()],
            resource: vec![Intrinsic::get_att("Bucket", "Arn")],
            condition: Some(condition),
        };

        assert_eq!(
            serde_json::to_value(&statement).unwrap(),
            json!({
                "Sid": "DenyHttp",
                "Effect": "Deny",
                "Principal": {"AWS": "*"},
                "Action": ["s3:*"],
                "Resource": [{"Fn::GetAtt": ["Bucket", "Arn"]}],
                "Condition": {"Bool": {"aws:SecureTransport": "false"}}
            })
        );
    }

    #[test]
    fn test_should_serialize_service_principal() {
        let principal = PolicyPrincipal::Service("lambda.amazonaws.com".to_owned());
        assert_eq!(
            serde_json::to_value(principal).unwrap(),
            json!({"Service": "lambda.amazonaws.com"})
        );
    }
}
