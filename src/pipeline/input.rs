//! Input resolution: load and validate a per-request deck description.
//!
//! A [`DeckRequest`] is everything one document contributes to assignment:
//! its extracted text, the generated slides and the candidate figures. It is
//! owned by the request and passed explicitly through the pipeline, so two
//! documents can be processed side by side without sharing any state.

use crate::error::FigslideError;
use crate::model::Slide;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One document's slides, figures and text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckRequest {
    /// Full extracted document text. Only its length is used.
    #[serde(default)]
    pub document_text: String,

    #[serde(default)]
    pub slides: Vec<Slide>,

    #[serde(default)]
    pub figures: Vec<FigureInput>,
}

/// A candidate figure as delivered by the extraction step.
///
/// Dimensions may be omitted when `data` holds an image whose header can
/// be probed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureInput {
    #[serde(alias = "page")]
    pub page_number: u32,

    #[serde(default)]
    pub width: Option<i64>,

    #[serde(default)]
    pub height: Option<i64>,

    /// Base64-encoded image bytes.
    #[serde(default)]
    pub data: Option<String>,
}

impl DeckRequest {
    /// Parse a request from JSON text. `source_name` labels errors.
    pub fn from_json(json: &str, source_name: &str) -> Result<Self, FigslideError> {
        let request: DeckRequest =
            serde_json::from_str(json).map_err(|e| FigslideError::InvalidRequest {
                source_name: source_name.to_string(),
                detail: e.to_string(),
            })?;
        request.validate(source_name)?;
        Ok(request)
    }

    /// Slide numbers must be ≥ 1 and unique within the deck.
    pub fn validate(&self, source_name: &str) -> Result<(), FigslideError> {
        let mut seen = HashSet::with_capacity(self.slides.len());
        for slide in &self.slides {
            if slide.sequence_number == 0 {
                return Err(FigslideError::InvalidRequest {
                    source_name: source_name.to_string(),
                    detail: format!(
                        "slide '{}' has sequence number 0; numbers are 1-indexed",
                        slide.title
                    ),
                });
            }
            if !seen.insert(slide.sequence_number) {
                return Err(FigslideError::InvalidRequest {
                    source_name: source_name.to_string(),
                    detail: format!("duplicate slide number {}", slide.sequence_number),
                });
            }
        }
        Ok(())
    }
}

/// Read and validate a request file.
pub fn load_request(path: impl AsRef<Path>) -> Result<DeckRequest, FigslideError> {
    let path = path.as_ref();
    let json = read_text(path)?;
    let request = DeckRequest::from_json(&json, &path.display().to_string())?;
    debug!(
        "Loaded deck request {}: {} slides, {} figures, {} chars of text",
        path.display(),
        request.slides.len(),
        request.figures.len(),
        request.document_text.len()
    );
    Ok(request)
}

/// Read a UTF-8 file, mapping I/O failures onto [`FigslideError`].
pub fn read_text(path: &Path) -> Result<String, FigslideError> {
    let path_buf = PathBuf::from(path);
    if !path.exists() {
        return Err(FigslideError::FileNotFound { path: path_buf });
    }
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => FigslideError::PermissionDenied { path: path_buf },
        std::io::ErrorKind::NotFound => FigslideError::FileNotFound { path: path_buf },
        _ => FigslideError::InvalidRequest {
            source_name: path.display().to_string(),
            detail: e.to_string(),
        },
    })
}
