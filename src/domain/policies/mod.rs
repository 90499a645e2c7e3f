//! Domain Policies
//!
//! Rules that govern when the engine may fetch and when it may retry.

mod failure_cache;
mod prefix_policy;

pub use failure_cache::FailureCache;
pub use prefix_policy::PrefixPolicy;
