//! Artifact store implementations

mod directory;
mod memory;

pub use directory::{ArtifactDirError, ArtifactDirectory, NAMES_FILE, PROCESSORS_FILE};
pub use memory::MemoryArtifactStore;
