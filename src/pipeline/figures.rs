//! Figure preparation: decode payloads, settle dimensions, drop decorations.
//!
//! Extraction hands over every raster image it found on every page, which
//! includes logos, icons and bullets. Anything narrower or shorter than
//! [`crate::AssignmentConfig::min_figure_size`] is skipped before matching.
//! When the extractor did not report dimensions, they are read from the
//! image header without decoding the pixels.
//!
//! Skips never abort the deck; they are returned as [`FigureError`]s.

use crate::error::FigureError;
use crate::model::Figure;
use crate::pipeline::input::FigureInput;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::Cursor;
use tracing::{debug, warn};

/// Figures ready for the matcher plus what was dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct PreparedFigures {
    pub figures: Vec<Figure>,
    /// `source_indices[i]` is the request position of `figures[i]`.
    pub source_indices: Vec<usize>,
    pub skipped: Vec<FigureError>,
}

/// Convert request figures into engine figures, in request order.
pub fn prepare_figures(inputs: &[FigureInput], min_figure_size: u32) -> PreparedFigures {
    let mut out = PreparedFigures::default();

    for (index, input) in inputs.iter().enumerate() {
        match prepare_one(index, input, min_figure_size) {
            Ok(figure) => {
                debug!(
                    "Figure {} (page {}): {}x{} accepted",
                    index, figure.page_number, figure.width, figure.height
                );
                out.figures.push(figure);
                out.source_indices.push(index);
            }
            Err(e) => {
                warn!("Skipping {}", e);
                out.skipped.push(e);
            }
        }
    }

    debug!(
        "Prepared {} of {} figures ({} skipped)",
        out.figures.len(),
        inputs.len(),
        out.skipped.len()
    );
    out
}

fn prepare_one(index: usize, input: &FigureInput, min: u32) -> Result<Figure, FigureError> {
    let page = input.page_number;
    let payload = match input.data.as_deref().map(str::trim) {
        Some(data) if !data.is_empty() => {
            decode_payload(data).map_err(|detail| FigureError::Undecodable {
                index,
                page,
                detail,
            })?
        }
        _ => Vec::new(),
    };

    let (width, height) = match (input.width, input.height) {
        (Some(w), Some(h)) => (w, h),
        _ if !payload.is_empty() => {
            let (w, h) = probe_dimensions(&payload).map_err(|detail| FigureError::Undecodable {
                index,
                page,
                detail,
            })?;
            (i64::from(w), i64::from(h))
        }
        _ => return Err(FigureError::MissingDimensions { index, page }),
    };

    if min > 0 && (width < i64::from(min) || height < i64::from(min)) {
        return Err(FigureError::BelowMinimumSize {
            index,
            page,
            width,
            height,
            min,
        });
    }

    Ok(Figure::new(page, width, height, payload))
}

/// Decode base64, tolerating a leading `data:<mime>;base64,` prefix.
fn decode_payload(data: &str) -> Result<Vec<u8>, String> {
    let b64 = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };
    STANDARD.decode(b64).map_err(|e| format!("invalid base64: {e}"))
}

/// Read width and height from the image header.
pub fn probe_dimensions(payload: &[u8]) -> Result<(u32, u32), String> {
    image::ImageReader::new(Cursor::new(payload))
        .with_guessed_format()
        .map_err(|e| e.to_string())?
        .into_dimensions()
        .map_err(|e| e.to_string())
}
