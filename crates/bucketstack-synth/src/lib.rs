//! Stack assembly and CloudFormation synthesis for BucketStack.
//!
//! A synthesis run is a single synchronous pass:
//!
//! ```text
//! context (CLI / file / env)
//!        |
//!        v
//!   AppContext::resolve
//!        |
//!        v
//!   assemble(StackProps)
//!     |- resolve_retention
//!     |- build_bucket        (preset + override -> BucketResource)
//!     |- build_access_policy (deny statements + grants -> AccessPolicy)
//!     '- outputs             (bucket name, bucket ARN)
//!        |
//!        v
//!   Stack::to_template -> JSON (stdout or cloud assembly directory)
//! ```
//!
//! Every step is pure except [`assembly::write_assembly`], which performs
//! the only I/O.

pub mod assembly;
pub mod bucket;
pub mod context;
pub mod policy;
pub mod presets;
pub mod retention;
pub mod stack;
pub mod validation;

pub use bucket::{BucketResource, build_bucket};
pub use context::{AppContext, Context};
pub use policy::{AccessPolicy, build_access_policy};
pub use presets::preset;
pub use retention::resolve_retention;
pub use stack::{Stack, StackOutput, StackProps, assemble};
