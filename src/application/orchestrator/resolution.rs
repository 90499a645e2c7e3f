//! Resolution - the detailed outcome of a lookup

use crate::domain::entities::CompiledArtifact;
use crate::error::SummonError;

/// What `resolve_with_fetch` found
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Artifact is stored (possibly just compiled)
    Found(CompiledArtifact),
    /// Genuine miss: not stored and outside the remote namespace, or the
    /// fetch and compile did not produce the name
    Absent,
    /// Fetch (including a remote name with no source), compile, consistency
    /// or timeout failure
    Failed(SummonError),
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn artifact(&self) -> Option<&CompiledArtifact> {
        match self {
            Resolution::Found(artifact) => Some(artifact),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&SummonError> {
        match self {
            Resolution::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Collapse to the plain lookup result: failures become absent
    pub fn into_artifact(self) -> Option<CompiledArtifact> {
        match self {
            Resolution::Found(artifact) => Some(artifact),
            Resolution::Absent | Resolution::Failed(_) => None,
        }
    }

    /// Keep failures distinct from a genuine miss
    pub fn into_result(self) -> Result<Option<CompiledArtifact>, SummonError> {
        match self {
            Resolution::Found(artifact) => Ok(Some(artifact)),
            Resolution::Absent => Ok(None),
            Resolution::Failed(err) => Err(err),
        }
    }
}

impl From<Option<CompiledArtifact>> for Resolution {
    fn from(value: Option<CompiledArtifact>) -> Self {
        value.map_or(Resolution::Absent, Resolution::Found)
    }
}
