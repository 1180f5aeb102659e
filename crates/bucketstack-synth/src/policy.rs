//! Access policy builder.
//!
//! Every bucket policy starts with two deny statements that hold regardless
//! of grants: plain HTTP requests are refused, and uploads that do not
//! declare the bucket's encryption algorithm are refused. Grants follow as
//! allow statements, one per grant, in the order given.

use std::collections::BTreeMap;

use bucketstack_core::BucketStackResult;
use bucketstack_model::policy::Conditions;
use bucketstack_model::properties::{BUCKET_POLICY_RESOURCE_TYPE, BucketPolicyProperties};
use bucketstack_model::{
    AccessGrant, AccessMode, Effect, Intrinsic, PolicyDocument, PolicyPrincipal, PolicyStatement,
    Resource,
};
use tracing::debug;

use crate::bucket::BucketResource;
use crate::validation::parse_principal;

/// Logical id of the bucket policy resource in the template.
pub const POLICY_LOGICAL_ID: &str = "StorageBucketPolicy";

/// Sid of the deny-insecure-transport statement.
pub const DENY_HTTP_SID: &str = "DenyHttpRequests";

/// Sid of the deny-unencrypted-upload statement.
pub const DENY_UNENCRYPTED_SID: &str = "DenyUnencryptedObjectUploads";

/// Descriptor of the bucket policy resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    /// Logical id in the template.
    pub logical_id: String,
    /// Logical id of the bucket the policy is attached to.
    pub bucket_logical_id: String,
    /// The policy document.
    pub document: PolicyDocument,
}

impl AccessPolicy {
    /// Render the CloudFormation properties.
    #[must_use]
    pub fn properties(&self) -> BucketPolicyProperties {
        BucketPolicyProperties {
            bucket: Intrinsic::reference(&self.bucket_logical_id),
            policy_document: self.document.clone(),
        }
    }

    /// Render the template resource.
    ///
    /// # Errors
    /// Returns an internal error if the properties cannot be serialized.
    pub fn to_resource(&self) -> BucketStackResult<Resource> {
        Ok(Resource {
            resource_type: BUCKET_POLICY_RESOURCE_TYPE.to_owned(),
            properties: serde_json::to_value(self.properties())?,
            deletion_policy: None,
            update_replace_policy: None,
        })
    }

    /// Statements granting access, i.e. everything after the mandatory denies.
    pub fn grant_statements(&self) -> impl Iterator<Item = &PolicyStatement> {
        self.document
            .statement
            .iter()
            .filter(|s| s.effect == Effect::Allow)
    }
}

/// Build the access policy for `bucket`.
///
/// # Errors
///
/// Returns [`BucketStackError::InvalidPrincipal`](bucketstack_core::BucketStackError::InvalidPrincipal)
/// if any grant names a malformed principal. No partial policy is produced.
pub fn build_access_policy(
    bucket: &BucketResource,
    grants: &[AccessGrant],
) -> BucketStackResult<AccessPolicy> {
    let mut document = PolicyDocument::default();
    document.statement.push(deny_insecure_transport(bucket));
    document.statement.push(deny_unencrypted_uploads(bucket));

    for (index, grant) in grants.iter().enumerate() {
        let principal = parse_principal(&grant.principal)?;
        debug!(
            principal = %grant.principal,
            mode = %grant.mode,
            "granting bucket access"
        );
        document
            .statement
            .push(grant_statement(bucket, index, grant.mode, principal));
    }

    Ok(AccessPolicy {
        logical_id: POLICY_LOGICAL_ID.to_owned(),
        bucket_logical_id: bucket.logical_id.clone(),
        document,
    })
}

fn condition(operator: &str, key: &str, value: &str) -> Conditions {
    BTreeMap::from([(
        operator.to_owned(),
        BTreeMap::from([(key.to_owned(), value.to_owned())]),
    )])
}

fn deny_insecure_transport(bucket: &BucketResource) -> PolicyStatement {
    PolicyStatement {
        sid: Some(DENY_HTTP_SID.to_owned()),
        effect: Effect::Deny,
        principal: PolicyPrincipal::any(),
        action: vec!["s3:*".to_owned()],
        resource: vec![bucket.arn(), bucket.objects_arn()],
        condition: Some(condition("Bool", "aws:SecureTransport", "false")),
    }
}

fn deny_unencrypted_uploads(bucket: &BucketResource) -> PolicyStatement {
    PolicyStatement {
        sid: Some(DENY_UNENCRYPTED_SID.to_owned()),
        effect: Effect::Deny,
        principal: PolicyPrincipal::any(),
        action: vec!["s3:PutObject".to_owned()],
        resource: vec![bucket.objects_arn()],
        condition: Some(condition(
            "StringNotEquals",
            "s3:x-amz-server-side-encryption",
            bucket.encryption().as_str(),
        )),
    }
}

fn grant_statement(
    bucket: &BucketResource,
    index: usize,
    mode: AccessMode,
    principal: PolicyPrincipal,
) -> PolicyStatement {
    let sid = match mode {
        AccessMode::Read => format!("GrantRead{index}"),
        AccessMode::Write => format!("GrantWrite{index}"),
    };
    PolicyStatement {
        sid: Some(sid),
        effect: Effect::Allow,
        principal,
        action: mode.actions().iter().map(|a| (*a).to_owned()).collect(),
        resource: vec![bucket.arn(), bucket.objects_arn()],
        condition: None,
    }
}
