//! Context defaults and cloud assembly integration tests.

#[cfg(test)]
mod tests {
    use bucketstack_core::StackEnvironment;
    use bucketstack_synth::assembly::{MANIFEST_FILE, write_assembly};
    use bucketstack_synth::{AppContext, Context, assemble};
    use serde_json::Value;

    use crate::{synth, synth_time};

    #[test]
    fn test_should_describe_stack_by_bucket_type() {
        let template = synth(&["bucketType=log"]);
        assert_eq!(template["AWSTemplateFormatVersion"], "2010-09-09");
        assert_eq!(
            template["Description"],
            "This stack includes S3 bucket for log storage with intelligent tiering"
        );
    }

    #[test]
    fn test_should_honour_explicit_names() {
        let template = synth(&[
            "bucketName=team-uploads",
            "description=Team uploads",
        ]);
        assert_eq!(
            template["Resources"]["StorageBucket"]["Properties"]["BucketName"],
            "team-uploads"
        );
        assert_eq!(template["Description"], "Team uploads");
    }

    #[test]
    fn test_should_write_cloud_assembly() {
        let dir = tempfile::tempdir().unwrap();
        let context = Context::from_json_str(
            r#"{"context": {"bucketType": "document", "environment": "staging"}}"#,
        )
        .unwrap();
        let app = AppContext::resolve(&context, synth_time(), false).unwrap();
        let stack = assemble(&app.to_stack_props()).unwrap();
        let env = StackEnvironment::from_parts(None, Some("us-east-1")).unwrap();

        let path = write_assembly(dir.path(), &stack, &env, false).unwrap();

        let template: Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert!(
            template["Resources"]["StorageBucket"]["Properties"]
                .get("BucketName")
                .is_none()
        );

        let manifest: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap(),
        )
        .unwrap();
        let artifact = &manifest["artifacts"]["document-storage-bucket-staging"];
        assert_eq!(artifact["type"], "aws:cloudformation:stack");
        assert_eq!(artifact["environment"], "aws://unknown-account/us-east-1");
    }
}
