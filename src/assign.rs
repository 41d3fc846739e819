//! Greedy figure-to-slide matching.
//!
//! Slides are visited in presentation order and each takes the best unused
//! figure it scores strictly above the threshold. A figure taken by an
//! earlier slide is never reconsidered, even if a later slide would score it
//! higher. The result is order-deterministic and costs
//! O(slides × figures) score evaluations.
//!
//! Ties go to the figure with the lower index because only a strictly
//! greater score replaces the current best.

use crate::config::AssignmentConfig;
use crate::model::{AssignmentStats, Figure, FigureRef, Slide, VisualKind};
use crate::relevance::{estimated_pages, score_words, slide_words};
use std::collections::HashSet;
use tracing::info;

/// Assign figures to `slides` in place and classify every slide.
///
/// After this returns, each slide has `visual_kind` set and
/// `visual_assignment` is `Some` exactly for [`VisualKind::PdfFigure`]
/// slides. No figure index is used twice. Empty inputs are fine: every
/// slide simply ends as [`VisualKind::TextEmphasis`].
pub fn assign_figures(
    slides: &mut [Slide],
    figures: &[Figure],
    document_text: &str,
    config: &AssignmentConfig,
) -> AssignmentStats {
    let callback = config.progress_callback.as_deref();
    if let Some(cb) = callback {
        cb.on_assignment_start(slides.len(), figures.len());
    }
    info!(
        "Assigning {} figures to {} slides (threshold {:.2})",
        figures.len(),
        slides.len(),
        config.threshold
    );

    let pages = estimated_pages(document_text, config.chars_per_page);
    let mut used: HashSet<usize> = HashSet::with_capacity(figures.len());
    let mut stats = AssignmentStats {
        total_slides: slides.len(),
        figures_available: figures.len(),
        ..AssignmentStats::default()
    };

    for slide in slides.iter_mut() {
        let words = slide_words(slide);
        let mut best: Option<usize> = None;
        let mut best_score = 0.0_f64;
        let mut scored_any = false;

        for (i, figure) in figures.iter().enumerate() {
            if used.contains(&i) {
                continue;
            }
            scored_any = true;
            let s = score_words(&words, figure, pages, config).relevance;
            if s > best_score {
                best_score = s;
                best = Some(i);
            }
        }

        slide.relevance = scored_any.then_some(best_score);

        match best {
            Some(i) if best_score > config.threshold => {
                slide.visual_assignment = Some(FigureRef(i));
                slide.visual_kind = Some(VisualKind::PdfFigure);
                used.insert(i);
                stats.figure_slides += 1;
                info!(
                    "Slide {} '{}' ← figure {} (relevance {:.2})",
                    slide.sequence_number, slide.title, i, best_score
                );
                if let Some(cb) = callback {
                    cb.on_figure_assigned(slide.sequence_number, i, best_score);
                }
            }
            _ => {
                slide.visual_assignment = None;
                slide.visual_kind = Some(VisualKind::TextEmphasis);
                stats.text_slides += 1;
                info!(
                    "Slide {} '{}': no figure above threshold, using text emphasis",
                    slide.sequence_number, slide.title
                );
                if let Some(cb) = callback {
                    cb.on_text_only(slide.sequence_number, slide.relevance);
                }
            }
        }
    }

    stats.figures_unused = figures.len() - used.len();
    info!(
        "Assignment complete: {} figure slides, {} text slides, {} figures unused",
        stats.figure_slides, stats.text_slides, stats.figures_unused
    );
    if let Some(cb) = callback {
        cb.on_assignment_complete(&stats);
    }
    stats
}

/// Owned-collection variant of [`assign_figures`].
pub fn assign(
    mut slides: Vec<Slide>,
    figures: &[Figure],
    document_text: &str,
    config: &AssignmentConfig,
) -> Vec<Slide> {
    assign_figures(&mut slides, figures, document_text, config);
    slides
}
