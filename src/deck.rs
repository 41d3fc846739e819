//! Top-level deck assembly: request in, annotated deck out.
//!
//! [`build_deck`] runs the whole pipeline for one request:
//!
//! 1. validate slide numbers
//! 2. prepare figures (decode, probe, drop small ones)
//! 3. normalise slide bullets
//! 4. score and assign figures
//! 5. suggest diagrams for text-only slides
//! 6. summarise figures for the renderer
//!
//! Nothing is cached between calls. Each request carries its own text,
//! slides and figures, so independent decks can be built concurrently.

use crate::assign::assign_figures;
use crate::config::AssignmentConfig;
use crate::error::{FigslideError, FigureError};
use crate::model::{AssignmentStats, Figure, Slide};
use crate::pipeline::encode;
use crate::pipeline::figures::prepare_figures;
use crate::pipeline::format::format_slide_content;
use crate::pipeline::input::{load_request, DeckRequest};
use crate::pipeline::technical::suggest_for_text_slides;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Renderer-facing description of one prepared figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureSummary {
    /// Index referenced by [`crate::model::FigureRef`].
    pub index: usize,
    /// Position of the figure in the request's `figures` array.
    pub source_index: usize,
    pub page_number: u32,
    pub width: i64,
    pub height: i64,
    pub mime_type: String,
    /// Set only when [`AssignmentConfig::embed_figures`] is on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_uri: Option<String>,
}

/// Result of processing one deck request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckOutput {
    /// Slides in their original order, every one classified.
    pub slides: Vec<Slide>,
    /// Figures the matcher considered, indexed as in `visual_assignment`.
    pub figures: Vec<FigureSummary>,
    /// Request figures that never reached the matcher.
    #[serde(default)]
    pub skipped_figures: Vec<FigureError>,
    pub stats: AssignmentStats,
    pub duration_ms: u64,
    #[serde(skip)]
    prepared: Vec<Figure>,
}

impl DeckOutput {
    /// Slide with the given sequence number.
    pub fn slide(&self, sequence_number: u32) -> Option<&Slide> {
        self.slides
            .iter()
            .find(|s| s.sequence_number == sequence_number)
    }

    /// Prepared figure by matcher index.
    ///
    /// Figures are only available on an output built in this process; a
    /// deserialised output carries summaries but no payloads.
    pub fn figure(&self, index: usize) -> Option<&Figure> {
        self.prepared.get(index)
    }

    /// Figure assigned to the given slide, if it has one.
    pub fn figure_for_slide(&self, sequence_number: u32) -> Option<&Figure> {
        self.slide(sequence_number)?
            .figure_index()
            .and_then(|i| self.figure(i))
    }
}

/// Run the full pipeline on an in-memory request.
pub fn build_deck(
    request: DeckRequest,
    config: &AssignmentConfig,
) -> Result<DeckOutput, FigslideError> {
    let start = Instant::now();
    request.validate("request")?;

    let DeckRequest {
        document_text,
        mut slides,
        figures,
    } = request;

    info!(
        "Building deck: {} slides, {} candidate figures",
        slides.len(),
        figures.len()
    );

    let prepared = prepare_figures(&figures, config.min_figure_size);

    for slide in slides.iter_mut() {
        // Suggestions describe this run's text-only slides, never a previous one.
        slide.visual_suggestion = None;
        if config.format_bullets {
            slide.body = format_slide_content(&slide.body);
        }
    }

    let stats = assign_figures(&mut slides, &prepared.figures, &document_text, config);

    if config.suggest_visuals {
        let n = suggest_for_text_slides(&mut slides);
        debug!("Attached {} diagram suggestions", n);
    }

    let summaries = prepared
        .figures
        .iter()
        .zip(&prepared.source_indices)
        .enumerate()
        .map(|(index, (figure, &source_index))| FigureSummary {
            index,
            source_index,
            page_number: figure.page_number,
            width: figure.width,
            height: figure.height,
            mime_type: encode::mime_type(&figure.payload).to_string(),
            data_uri: (config.embed_figures && !figure.payload.is_empty())
                .then(|| encode::data_uri(&figure.payload)),
        })
        .collect();

    let duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Deck built in {}ms: {}/{} slides with figures",
        duration_ms, stats.figure_slides, stats.total_slides
    );

    Ok(DeckOutput {
        slides,
        figures: summaries,
        skipped_figures: prepared.skipped,
        stats,
        duration_ms,
        prepared: prepared.figures,
    })
}

/// Load a request file and build its deck.
pub fn build_deck_from_file(
    path: impl AsRef<Path>,
    config: &AssignmentConfig,
) -> Result<DeckOutput, FigslideError> {
    let request = load_request(path)?;
    build_deck(request, config)
}

/// Build a deck and write it as pretty JSON to `output`.
///
/// The file is written to a temporary sibling first and moved into place,
/// so readers never observe a half-written deck.
pub fn build_deck_to_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &AssignmentConfig,
) -> Result<AssignmentStats, FigslideError> {
    let deck = build_deck_from_file(input, config)?;
    write_deck(&deck, output.as_ref())?;
    Ok(deck.stats)
}

/// Serialise `deck` to `path` atomically.
pub fn write_deck(deck: &DeckOutput, path: &Path) -> Result<(), FigslideError> {
    let json = serde_json::to_string_pretty(deck)
        .map_err(|e| FigslideError::Internal(format!("serialise deck: {e}")))?;
    write_atomic(path, json.as_bytes())
}

/// Write every assigned figure's bytes into `dir` as `figure_{index}.{ext}`.
///
/// Returns the written paths in slide order. Figures without payload bytes
/// are skipped.
pub fn export_figures(deck: &DeckOutput, dir: &Path) -> Result<Vec<PathBuf>, FigslideError> {
    std::fs::create_dir_all(dir).map_err(|e| FigslideError::OutputWriteFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut written = Vec::new();
    for slide in &deck.slides {
        let Some(index) = slide.figure_index() else {
            continue;
        };
        let Some(figure) = deck.figure(index) else {
            continue;
        };
        if figure.payload.is_empty() {
            continue;
        }
        let path = dir.join(format!(
            "figure_{}.{}",
            index,
            encode::file_extension(&figure.payload)
        ));
        write_atomic(&path, &figure.payload)?;
        debug!("Exported figure {} → {}", index, path.display());
        written.push(path);
    }
    Ok(written)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), FigslideError> {
    let fail = |source: std::io::Error| FigslideError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(fail)?;
    tmp.write_all(bytes).map_err(fail)?;
    tmp.persist(path).map_err(|e| fail(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FigureRef, VisualKind};
    use crate::pipeline::input::FigureInput;

    fn figure_input(page: u32, w: i64, h: i64) -> FigureInput {
        FigureInput {
            page_number: page,
            width: Some(w),
            height: Some(h),
            data: None,
        }
    }

    fn request() -> DeckRequest {
        DeckRequest {
            document_text: "t".repeat(4000),
            slides: vec![
                Slide::new(1, "System Architecture", "- overview of the pipeline"),
                Slide::new(2, "Thanks", "Questions welcome; slides online"),
            ],
            figures: vec![figure_input(1, 64, 64), figure_input(1, 800, 600)],
        }
    }

    #[test]
    fn builds_and_indexes_prepared_figures() {
        let deck = build_deck(request(), &AssignmentConfig::default()).expect("build");
        assert_eq!(deck.figures.len(), 1);
        assert_eq!(deck.figures[0].source_index, 1);
        assert_eq!(deck.skipped_figures.len(), 1);

        let first = deck.slide(1).unwrap();
        assert_eq!(first.visual_kind, Some(VisualKind::PdfFigure));
        assert_eq!(first.visual_assignment, Some(FigureRef(0)));
        assert_eq!(deck.figure_for_slide(1).unwrap().width, 800);
        assert!(deck.figure_for_slide(2).is_none());
    }

    #[test]
    fn bullets_are_normalised() {
        let deck = build_deck(request(), &AssignmentConfig::default()).unwrap();
        assert_eq!(deck.slide(1).unwrap().body, "• overview of the pipeline");
        assert_eq!(
            deck.slide(2).unwrap().body,
            "• Questions welcome\n• slides online"
        );
    }

    #[test]
    fn formatting_can_be_disabled() {
        let config = AssignmentConfig::builder().format_bullets(false).build().unwrap();
        let deck = build_deck(request(), &config).unwrap();
        assert_eq!(deck.slide(1).unwrap().body, "- overview of the pipeline");
    }

    #[test]
    fn suggestions_only_when_enabled() {
        let mut req = request();
        req.slides.push(Slide::new(3, "Flow", "• data pipeline stages"));
        let deck = build_deck(req.clone(), &AssignmentConfig::default()).unwrap();
        let s = deck.slide(3).unwrap();
        assert_eq!(s.visual_kind, Some(VisualKind::TextEmphasis));
        assert_eq!(s.visual_suggestion.as_ref().unwrap().category, "data_flow");

        let off = AssignmentConfig::builder().suggest_visuals(false).build().unwrap();
        let deck = build_deck(req, &off).unwrap();
        assert!(deck.slide(3).unwrap().visual_suggestion.is_none());
    }

    #[test]
    fn invalid_request_rejected() {
        let mut req = request();
        req.slides[1].sequence_number = 1;
        assert!(matches!(
            build_deck(req, &AssignmentConfig::default()),
            Err(FigslideError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn inherited_suggestions_are_cleared() {
        let stale = || {
            Some(crate::model::VisualSuggestion {
                category: "network".to_string(),
                description: "from an earlier run".to_string(),
            })
        };
        let mut req = request();
        for slide in req.slides.iter_mut() {
            slide.visual_suggestion = stale();
        }

        let deck = build_deck(req.clone(), &AssignmentConfig::default()).unwrap();
        let first = deck.slide(1).unwrap();
        assert_eq!(first.visual_kind, Some(VisualKind::PdfFigure));
        assert_eq!(first.visual_suggestion, None);

        let config = AssignmentConfig::builder()
            .suggest_visuals(false)
            .build()
            .unwrap();
        req.figures.clear();
        let deck = build_deck(req, &config).unwrap();
        assert!(deck.slides.iter().all(|s| s.visual_suggestion.is_none()));
        assert_eq!(deck.stats.text_slides, 2);
    }

    #[test]
    fn empty_request_builds_empty_deck() {
        let deck = build_deck(DeckRequest::default(), &AssignmentConfig::default()).unwrap();
        assert!(deck.slides.is_empty());
        assert_eq!(deck.stats, AssignmentStats::default());
    }

    #[test]
    fn write_deck_produces_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        let deck = build_deck(request(), &AssignmentConfig::default()).unwrap();
        write_deck(&deck, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: DeckOutput = serde_json::from_str(&text).unwrap();
        assert_eq!(back.slides, deck.slides);
        assert_eq!(back.stats, deck.stats);
        assert!(back.figure(0).is_none(), "payloads are not serialised");
    }
}
