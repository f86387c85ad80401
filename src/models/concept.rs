use crate::error::LogoError;
use crate::models::image::{GeneratedImage, ImageReference};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

pub const CONCEPT_MIME_TYPE: &str = "image/png";

/// Download filename for the concept at a 1-indexed position.
pub fn concept_file_name(position: usize) -> String {
    format!("logo_concept_{}.png", position)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConceptResult {
    /// 0-based position of the request that produced this concept.
    pub index: usize,
    pub image_reference: ImageReference,
    pub revised_prompt: Option<String>,
}

impl ConceptResult {
    pub fn position(&self) -> usize {
        self.index + 1
    }
}

/// Result of a single issued sub-request.
#[derive(Debug)]
pub enum ConceptAttempt {
    Generated(GeneratedImage),
    Failed(LogoError),
}

#[derive(Debug)]
pub enum GenerationOutcome {
    Completed(Vec<ConceptResult>),
    /// `position` is the 1-based sub-request that failed.
    BatchFailed { position: usize, cause: LogoError },
}

impl GenerationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, GenerationOutcome::Completed(_))
    }

    pub fn concepts(&self) -> &[ConceptResult] {
        match self {
            GenerationOutcome::Completed(concepts) => concepts,
            GenerationOutcome::BatchFailed { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    pub fn new(position: usize, bytes: Vec<u8>) -> Self {
        Self {
            file_name: concept_file_name(position),
            mime_type: CONCEPT_MIME_TYPE,
            bytes,
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadState {
    Ready(Download),
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentedConcept {
    pub position: usize,
    pub caption: String,
    pub image_reference: ImageReference,
    pub revised_prompt: Option<String>,
    pub download: DownloadState,
}

impl PresentedConcept {
    pub fn download(&self) -> Option<&Download> {
        match &self.download {
            DownloadState::Ready(download) => Some(download),
            DownloadState::Unavailable(_) => None,
        }
    }

    pub fn fetch_error(&self) -> Option<&str> {
        match &self.download {
            DownloadState::Ready(_) => None,
            DownloadState::Unavailable(reason) => Some(reason),
        }
    }
}
