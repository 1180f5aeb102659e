//! Stack output integration tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use bucketstack_core::BucketStackError;

    use crate::{synth, try_synth};

    #[test]
    fn test_should_export_bucket_name_and_arn() {
        let template = synth(&["stackName=TestStorageBucketStack"]);
        let outputs = template["Outputs"].as_object().unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(
            outputs["StorageBucketName"]["Value"],
            json!({"Ref": "StorageBucket"})
        );
        assert_eq!(
            outputs["StorageBucketName"]["Export"]["Name"],
            "TestStorageBucketStack-BucketName"
        );
        assert_eq!(
            outputs["StorageBucketArn"]["Value"],
            json!({"Fn::GetAtt": ["StorageBucket", "Arn"]})
        );
        assert_eq!(
            outputs["StorageBucketArn"]["Export"]["Name"],
            "TestStorageBucketStack-BucketArn"
        );
    }

    #[test]
    fn test_should_derive_export_names_from_default_stack_name() {
        let template = synth(&["bucketType=document", "environment=Prod-EU"]);
        assert_eq!(
            template["Outputs"]["StorageBucketArn"]["Export"]["Name"],
            "document-storage-bucket-prod-BucketArn"
        );
    }

    #[test]
    fn test_should_reject_stack_names_unfit_for_exports() {
        for name in ["../escaped stack_1", "my stack", "stack_1", "9lives"] {
            let pair = format!("stackName={name}");
            let err = try_synth(&[pair.as_str()]).unwrap_err();
            assert!(
                matches!(err, BucketStackError::InvalidStackName { .. }),
                "{name:?} should be rejected"
            );
        }
    }
}
