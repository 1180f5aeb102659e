//! Core types, configuration, and error taxonomy for BucketStack.
//!
//! This crate provides the building blocks shared by the synthesizer and the
//! command line front-end: the process configuration loaded from the
//! environment, the error type every synthesis step returns, and the AWS
//! account/region identifiers that make up a stack environment.

mod config;
mod error;
mod types;

pub use config::{BucketStackConfig, parse_bool};
pub use error::{BucketStackError, BucketStackResult, ErrorKind};
pub use types::{AccountId, AwsRegion, StackEnvironment};
