//! Bucket configuration records and CloudFormation template model.
//!
//! The crate has two halves:
//!
//! - [`bucket`] and [`access`]: the domain records a stack is configured
//!   with (categories, tiering and lifecycle policies, access grants).
//! - [`template`], [`properties`] and [`policy`]: the typed shape of the
//!   CloudFormation document those records are rendered into.
//!
//! Wire structs use `#[serde(rename_all = "PascalCase")]` to match the
//! CloudFormation resource specification.
#![allow(clippy::struct_excessive_bools)]

pub mod access;
pub mod bucket;
pub mod policy;
pub mod properties;
pub mod template;

pub use access::{AccessGrant, AccessMode};
pub use bucket::{
    BucketCategory, BucketConfig, BucketConfigOverride, LifecycleOverride, LifecyclePolicy,
    RemovalPolicy, ServerSideEncryption, TieringOverride, TieringPolicy,
};
pub use policy::{Effect, PolicyDocument, PolicyPrincipal, PolicyStatement};
pub use template::{DeletionPolicy, Export, Intrinsic, Output, Resource, Template};
