//! The selected, not-yet-submitted file and its display metadata.

use serde::Serialize;
use uuid::Uuid;

use crate::file::SourceFile;
use crate::size::format_size;

/// Identity of one accepted selection. A new id is minted on every accept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CandidateId(Uuid);

impl CandidateId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CandidateId {
    fn default() -> Self {
        Self::new()
    }
}

/// The active selection of an intake controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadCandidate {
    pub id: CandidateId,
    pub source: SourceFile,
    pub display_name: String,
    pub display_size: String,
    /// Inline preview (a data URI), filled in after acceptance for images.
    pub preview: Option<String>,
}

impl UploadCandidate {
    #[must_use]
    pub fn from_file(source: SourceFile) -> Self {
        Self {
            id: CandidateId::new(),
            display_name: source.name.clone(),
            display_size: format_size(source.size),
            preview: None,
            source,
        }
    }
}

/// What a view needs to render a candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CandidateView {
    pub name: String,
    pub size: String,
    pub preview: Option<String>,
}

impl From<&UploadCandidate> for CandidateView {
    fn from(candidate: &UploadCandidate) -> Self {
        Self {
            name: candidate.display_name.clone(),
            size: candidate.display_size.clone(),
            preview: candidate.preview.clone(),
        }
    }
}
