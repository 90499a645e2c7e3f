//! Domain Services
//!
//! Business logic that operates on domain entities through ports only.

mod processor_discovery;

pub use processor_discovery::ProcessorDiscovery;
