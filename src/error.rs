//! Error types for the figslide library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`FigslideError`] — **Fatal**: the deck cannot be processed at all
//!   (missing request file, malformed JSON, invalid configuration). Returned
//!   as `Err(FigslideError)` from the top-level `build_deck*` functions.
//!
//! * [`FigureError`] — **Non-fatal**: a single candidate figure was skipped
//!   (undecodable payload, too small to be a real figure) but the rest of the
//!   deck is fine. Stored inside [`crate::deck::DeckOutput`] so callers can
//!   see what was dropped instead of losing the whole deck to one bad image.
//!
//! The assignment engine itself never returns either: it is pure computation
//! over validated data and degrades to text-only slides instead of failing.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the figslide library.
#[derive(Debug, Error)]
pub enum FigslideError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Request file was not found at the given path.
    #[error("Deck request not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The request was read but is not a usable deck description.
    #[error("Invalid deck request '{source_name}': {detail}")]
    InvalidRequest { source_name: String, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single candidate figure.
///
/// `index` is the figure's position in the request's `figures` array.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum FigureError {
    /// Payload was present but neither base64 nor a recognised image.
    #[error("Figure {index} (page {page}): payload could not be decoded: {detail}")]
    Undecodable {
        index: usize,
        page: u32,
        detail: String,
    },

    /// No explicit dimensions and no payload to probe them from.
    #[error("Figure {index} (page {page}): no dimensions and no payload to probe")]
    MissingDimensions { index: usize, page: u32 },

    /// Likely a logo or icon rather than a figure.
    #[error("Figure {index} (page {page}): {width}x{height} is below the {min}px minimum")]
    BelowMinimumSize {
        index: usize,
        page: u32,
        width: i64,
        height: i64,
        min: u32,
    },
}

impl FigureError {
    /// Position of the skipped figure in the request.
    pub fn index(&self) -> usize {
        match self {
            FigureError::Undecodable { index, .. }
            | FigureError::MissingDimensions { index, .. }
            | FigureError::BelowMinimumSize { index, .. } => *index,
        }
    }
}
