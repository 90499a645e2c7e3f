//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `store/` - Artifact store (in-memory) and the on-disk artifact directory
//! - `repositories/` - Source repositories (Directory, Memory)
//! - `backend/` - Compiler backends (external command)
//! - `events/` - Event sinks (NDJSON)

pub mod backend;
pub mod events;
pub mod repositories;
pub mod store;

// Re-export for convenience
pub use backend::{CommandBackend, CommandSpec};
pub use events::JsonEventSink;
pub use repositories::{DirectorySourceRepository, MemorySourceRepository};
pub use store::{
    ArtifactDirError, ArtifactDirectory, MemoryArtifactStore, NAMES_FILE, PROCESSORS_FILE,
};
