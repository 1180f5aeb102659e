//! Bucket policy integration tests.

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::{resources_of_type, synth, try_synth};

    fn statements(template: &Value) -> Vec<Value> {
        let policy = resources_of_type(template, "AWS::S3::BucketPolicy")[0];
        policy["Properties"]["PolicyDocument"]["Statement"]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }

    #[test]
    fn test_should_attach_policy_to_bucket() {
        let template = synth(&[]);
        let policy = resources_of_type(&template, "AWS::S3::BucketPolicy")[0];
        assert_eq!(policy["Properties"]["Bucket"], json!({"Ref": "StorageBucket"}));
        assert!(policy.get("DeletionPolicy").is_none());
    }

    #[test]
    fn test_should_enforce_secure_transport() {
        let statements = statements(&synth(&["bucketType=log"]));
        let deny = &statements[0];

        assert_eq!(deny["Effect"], "Deny");
        assert_eq!(
            deny["Condition"],
            json!({"Bool": {"aws:SecureTransport": "false"}})
        );
        assert_eq!(
            deny["Resource"],
            json!([
                {"Fn::GetAtt": ["StorageBucket", "Arn"]},
                {"Fn::Join": ["", [{"Fn::GetAtt": ["StorageBucket", "Arn"]}, "/*"]]}
            ])
        );
    }

    #[test]
    fn test_should_deny_unencrypted_uploads() {
        let statements = statements(&synth(&[]));
        assert_eq!(statements[1]["Effect"], "Deny");
        assert_eq!(statements[1]["Action"], json!(["s3:PutObject"]));
        assert_eq!(
            statements[1]["Condition"]["StringNotEquals"]["s3:x-amz-server-side-encryption"],
            "AES256"
        );
    }

    #[test]
    fn test_should_grant_access_in_input_order() {
        let statements = statements(&synth(&[
            "readAccessPrincipals=arn:aws:iam::123456789012:role/reader,210987654321",
            "writeAccessPrincipals=lambda.amazonaws.com",
        ]));

        assert_eq!(statements.len(), 5);
        assert_eq!(statements[2]["Sid"], "GrantRead0");
        assert_eq!(
            statements[2]["Principal"],
            json!({"AWS": "arn:aws:iam::123456789012:role/reader"})
        );
        assert_eq!(statements[3]["Sid"], "GrantRead1");
        assert_eq!(
            statements[3]["Principal"],
            json!({"AWS": "arn:aws:iam::210987654321:root"})
        );
        assert_eq!(statements[4]["Sid"], "GrantWrite2");
        assert_eq!(
            statements[4]["Principal"],
            json!({"Service": "lambda.amazonaws.com"})
        );
        assert!(
            statements[4]["Action"]
                .as_array()
                .unwrap()
                .contains(&json!("s3:PutObject"))
        );
    }

    #[test]
    fn test_should_reject_malformed_principal() {
        let err = try_synth(&["writeAccessPrincipals=*"]).unwrap_err();
        assert!(err.is_validation());
    }
}
