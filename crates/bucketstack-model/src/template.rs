//! CloudFormation template document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Template format version emitted in every document.
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// A CloudFormation template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    /// Always [`TEMPLATE_FORMAT_VERSION`].
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    /// Free-form stack description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resources keyed by logical id.
    pub resources: BTreeMap<String, Resource>,
    /// Outputs keyed by logical id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Output>,
}

impl Template {
    /// An empty template with an optional description.
    #[must_use]
    pub fn new(description: Option<String>) -> Self {
        Self {
            format_version: TEMPLATE_FORMAT_VERSION.to_owned(),
            description,
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    /// Resources of the given CloudFormation type.
    pub fn resources_of_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a Resource)> + 'a {
        self.resources
            .iter()
            .filter(move |(_, r)| r.resource_type == resource_type)
    }
}

/// One template resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    /// CloudFormation resource type, e.g. `AWS::S3::Bucket`.
    #[serde(rename = "Type")]
    pub resource_type: String,
    /// Resource properties.
    pub properties: serde_json::Value,
    /// What happens to the physical resource when it leaves the stack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<DeletionPolicy>,
    /// What happens to the old physical resource on replacement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_replace_policy: Option<DeletionPolicy>,
}

/// CloudFormation `DeletionPolicy` / `UpdateReplacePolicy` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeletionPolicy {
    /// Keep the physical resource.
    Retain,
    /// Delete the physical resource.
    Delete,
}

/// A stack output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    /// The exported value.
    pub value: Intrinsic,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Cross-stack export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<Export>,
}

/// Cross-stack export of an output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Export {
    /// Export name, unique per account and region.
    pub name: String,
}

/// A template value: a literal or an intrinsic function.
///
/// Serializes to the CloudFormation JSON form, e.g. `{"Ref": "Bucket"}` or
/// `{"Fn::GetAtt": ["Bucket", "Arn"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intrinsic {
    /// `Ref` to a logical id.
    #[serde(rename = "Ref")]
    Ref(String),
    /// `Fn::GetAtt` of a logical id and attribute name.
    #[serde(rename = "Fn::GetAtt")]
    GetAtt(String, String),
    /// `Fn::Join` of parts with a delimiter.
    #[serde(rename = "Fn::Join")]
    Join(String, Vec<Intrinsic>),
    /// Plain string.
    #[serde(untagged)]
    Literal(String),
}

impl Intrinsic {
    /// `Ref` to `logical_id`.
    #[must_use]
    pub fn reference(logical_id: impl Into<String>) -> Self {
        Self::Ref(logical_id.into())
    }

    /// `Fn::GetAtt` of `attribute` on `logical_id`.
    #[must_use]
    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::GetAtt(logical_id.into(), attribute.into())
    }

    /// `Fn::Join` of `parts` with no delimiter.
    #[must_use]
    pub fn concat(parts: Vec<Intrinsic>) -> Self {
        Self::Join(String::new(), parts)
    }

    /// A plain string.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_should_serialize_intrinsics() {
        assert_eq!(
            serde_json::to_value(Intrinsic::reference("Bucket")).unwrap(),
            json!({"Ref": "Bucket"})
        );
        assert_eq!(
            serde_json::to_value(Intrinsic::get_att("Bucket", "Arn")).unwrap(),
            json!({"Fn::GetAtt": ["Bucket", "Arn"]})
        );
        assert_eq!(
            serde_json::to_value(Intrinsic::concat(vec![
                Intrinsic::get_att("Bucket", "Arn"),
                Intrinsic::literal("/*"),
            ]))
            .unwrap(),
            json!({"Fn::Join": ["", [{"Fn::GetAtt": ["Bucket", "Arn"]}, "/*"]]})
        );
    }

    #[test]
    fn test_should_serialize_template_skeleton() {
        let mut template = Template::new(Some("demo".to_owned()));
        template.resources.insert(
            "Bucket".to_owned(),
            Resource {
                resource_type: "AWS::S3::Bucket".to_owned(),
                properties: json!({}),
                deletion_policy: Some(DeletionPolicy::Retain),
                update_replace_policy: Some(DeletionPolicy::Retain),
            },
        );

        let value = serde_json::to_value(&template).unwrap();
        assert_eq!(value["AWSTemplateFormatVersion"], "2010-09-09");
        assert_eq!(value["Description"], "demo");
        assert_eq!(value["Resources"]["Bucket"]["Type"], "AWS::S3::Bucket");
        assert_eq!(value["Resources"]["Bucket"]["DeletionPolicy"], "Retain");
        assert!(value.get("Outputs").is_none());
    }

    #[test]
    fn test_should_filter_resources_by_type() {
        let mut template = Template::new(None);
        for (id, ty) in [("A", "AWS::S3::Bucket"), ("B", "AWS::S3::BucketPolicy")] {
            template.resources.insert(
                id.to_owned(),
                Resource {
                    resource_type: ty.to_owned(),
                    properties: json!({}),
                    deletion_policy: None,
                    update_replace_policy: None,
                },
            );
        }
        assert_eq!(template.resources_of_type("AWS::S3::Bucket").count(), 1);
        assert_eq!(template.resources_of_type("AWS::SQS::Queue").count(), 0);
    }
}
