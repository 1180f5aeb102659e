//! Storage bucket resource integration tests.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{has_resource_properties, resource_count_is, resources_of_type, synth, try_synth};

    const BUCKET: &str = "AWS::S3::Bucket";

    #[test]
    fn test_should_create_bucket_with_intelligent_tiering() {
        let template = synth(&["stackName=TestStorageBucketStack"]);

        assert_eq!(resource_count_is(&template, BUCKET), 1);
        assert!(has_resource_properties(
            &template,
            BUCKET,
            &json!({
                "VersioningConfiguration": {"Status": "Enabled"},
                "PublicAccessBlockConfiguration": {
                    "BlockPublicAcls": true,
                    "BlockPublicPolicy": true,
                    "IgnorePublicAcls": true,
                    "RestrictPublicBuckets": true
                },
                "IntelligentTieringConfigurations": [{
                    "Id": "archive-infrequent-access",
                    "Status": "Enabled",
                    "Tierings": [
                        {"AccessTier": "ARCHIVE_ACCESS", "Days": 90},
                        {"AccessTier": "DEEP_ARCHIVE_ACCESS", "Days": 180}
                    ]
                }]
            })
        ));
        assert_eq!(resource_count_is(&template, "AWS::S3::BucketPolicy"), 1);
    }

    #[test]
    fn test_should_encrypt_at_rest() {
        let template = synth(&[]);
        assert!(has_resource_properties(
            &template,
            BUCKET,
            &json!({
                "BucketEncryption": {
                    "ServerSideEncryptionConfiguration": [{
                        "ServerSideEncryptionByDefault": {"SSEAlgorithm": "AES256"}
                    }]
                }
            })
        ));
    }

    #[test]
    fn test_should_apply_log_preset_in_dev() {
        let template = synth(&["bucketType=log", "environment=dev"]);
        let bucket = resources_of_type(&template, BUCKET)[0];

        assert_eq!(bucket["DeletionPolicy"], "Delete");
        assert_eq!(bucket["UpdateReplacePolicy"], "Delete");
        assert!(bucket["Properties"].get("VersioningConfiguration").is_none());
        assert!(has_resource_properties(
            &template,
            BUCKET,
            &json!({
                "IntelligentTieringConfigurations": [{
                    "Id": "archive-infrequent-access",
                    "Status": "Enabled",
                    "Tierings": [
                        {"AccessTier": "ARCHIVE_ACCESS", "Days": 30},
                        {"AccessTier": "DEEP_ARCHIVE_ACCESS", "Days": 90}
                    ]
                }],
                "LifecycleConfiguration": {
                    "Rules": [{
                        "Id": "intelligent-tiering-transition",
                        "Status": "Enabled",
                        "Transitions": [{
                            "StorageClass": "INTELLIGENT_TIERING",
                            "TransitionInDays": 7
                        }],
                        "NoncurrentVersionExpiration": {"NoncurrentDays": 30}
                    }]
                }
            })
        ));
    }

    #[test]
    fn test_should_retain_media_bucket_in_production() {
        let template = synth(&["bucketType=media", "environment=production"]);
        let bucket = resources_of_type(&template, BUCKET)[0];

        assert_eq!(bucket["DeletionPolicy"], "Retain");
        assert_eq!(bucket["UpdateReplacePolicy"], "Retain");
        assert_eq!(
            bucket["Properties"]["VersioningConfiguration"],
            json!({"Status": "Enabled"})
        );
        assert_eq!(
            bucket["Properties"]["BucketName"],
            "media-storage-prod-20261019-120000"
        );
    }

    #[test]
    fn test_should_apply_document_preset() {
        let template = synth(&["bucketType=document"]);
        assert!(has_resource_properties(
            &template,
            BUCKET,
            &json!({
                "IntelligentTieringConfigurations": [{
                    "Id": "archive-infrequent-access",
                    "Status": "Enabled",
                    "Tierings": [
                        {"AccessTier": "ARCHIVE_ACCESS", "Days": 60},
                        {"AccessTier": "DEEP_ARCHIVE_ACCESS", "Days": 120}
                    ]
                }]
            })
        ));
    }

    #[test]
    fn test_should_merge_custom_override() {
        let template = synth(&[
            "bucketType=custom",
            r#"bucketConfig={"bucketName":"custom-data","versioned":false,"intelligentTiering":{"archiveAccessTierDays":120,"deepArchiveAccessTierDays":365}}"#,
        ]);
        let bucket = resources_of_type(&template, BUCKET)[0];

        assert_eq!(bucket["Properties"]["BucketName"], "custom-data");
        assert!(bucket["Properties"].get("VersioningConfiguration").is_none());
        assert_eq!(
            bucket["Properties"]["IntelligentTieringConfigurations"][0]["Tierings"][1]["Days"],
            365
        );
    }

    #[test]
    fn test_should_disable_tiering_through_override() {
        let template = synth(&[
            "bucketType=log",
            r#"bucketConfig={"intelligentTiering":{"enabled":false}}"#,
        ]);
        assert!(has_resource_properties(
            &template,
            BUCKET,
            &json!({
                "IntelligentTieringConfigurations": [{
                    "Id": "archive-infrequent-access",
                    "Status": "Disabled",
                    "Tierings": [
                        {"AccessTier": "ARCHIVE_ACCESS", "Days": 30},
                        {"AccessTier": "DEEP_ARCHIVE_ACCESS", "Days": 90}
                    ]
                }]
            })
        ));
    }

    #[test]
    fn test_should_reject_custom_without_override() {
        let err = try_synth(&["bucketType=custom"]).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_should_reject_inverted_tiering() {
        let err = try_synth(&[
            r#"bucketConfig={"intelligentTiering":{"archiveAccessTierDays":200}}"#,
        ])
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_should_reject_invalid_bucket_name() {
        let err = try_synth(&["bucketName=Not_A_Bucket"]).unwrap_err();
        assert!(err.is_validation());
    }
}
