//! Intent resolution for sheetgate.
//!
//! Maps one free-text command to exactly one validated [`Action`] by handing
//! the action vocabulary's tool schemas to a hosted language model and
//! consuming its function-calling response. The model call is the only
//! long-latency step in the system, so it is always timeout-bound and every
//! failure mode is a typed [`ResolverError`].
//!
//! The mapping itself lives entirely in the model; this crate contributes the
//! schemas, the prompt, and the consumption rules, most importantly that a
//! concrete action always beats an `inform_user` fallback when the model
//! produces both.
//!
//! [`Action`]: actions::Action

pub mod error;
pub mod prompt;
pub mod resolver;

pub use error::ResolverError;
pub use resolver::{IntentResolver, LlmResolver, ResolveTarget};
