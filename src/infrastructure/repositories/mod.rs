//! Source Repository Implementations
//!
//! Concrete implementations of the `SourceRepository` port.

mod directory_source;
mod memory_source;

pub use directory_source::DirectorySourceRepository;
pub use memory_source::MemorySourceRepository;
