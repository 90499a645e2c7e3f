//! Domain Entities
//!
//! - `SourceUnit` - A named compilation input
//! - `CompiledArtifact` - A named compiled output
//! - `CompileReport` - What one compile call did

mod artifact;
mod report;
mod source_unit;

pub use artifact::CompiledArtifact;
pub use report::CompileReport;
pub use source_unit::SourceUnit;
