//! Relevance scoring between one slide and one candidate figure.
//!
//! The score is a weighted sum of three cheap signals, each in `[0, 1]`:
//!
//! | Term    | Weight | Signal |
//! |---------|--------|--------|
//! | keyword | 0.5    | share of the vocabulary the slide text mentions |
//! | size    | 0.3    | figure area relative to an 800×600 reference |
//! | context | 0.2    | closeness of the figure's page to the estimated page count |
//!
//! A slide that literally says "figure" or "diagram" gets a ×1.2 boost, and
//! the result is capped at 1.0. Everything is plain floating-point arithmetic
//! over the inputs, so identical inputs always give the identical `f64`.
//!
//! The context term compares the figure's page with the document's estimated
//! length (`chars / 4000`, floored at one page). It is a coarse heuristic and
//! is kept as tuned.

use crate::config::AssignmentConfig;
use crate::model::{Figure, Slide};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

static RE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Per-term values behind a relevance score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceBreakdown {
    pub keyword: f64,
    pub size: f64,
    pub context: f64,
    /// Whether the slide mentioned a boost term.
    pub boosted: bool,
    /// Final clamped score.
    pub relevance: f64,
}

/// Lowercased word set of a slide's title and body.
///
/// Bullet glyphs, punctuation and newlines all act as word boundaries.
pub fn slide_words(slide: &Slide) -> HashSet<String> {
    let text = format!("{} {}", slide.title, slide.body).to_lowercase();
    RE_WORD
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Estimated page count of the source document, never below one.
pub fn estimated_pages(document_text: &str, chars_per_page: usize) -> u64 {
    let chars = document_text.chars().count();
    ((chars / chars_per_page.max(1)) as u64).max(1)
}

/// Relevance of `figure` to `slide`, in `[0.0, 1.0]`.
pub fn score(
    slide: &Slide,
    figure: &Figure,
    document_text: &str,
    config: &AssignmentConfig,
) -> f64 {
    score_breakdown(slide, figure, document_text, config).relevance
}

/// Like [`score`] but returns every intermediate term.
pub fn score_breakdown(
    slide: &Slide,
    figure: &Figure,
    document_text: &str,
    config: &AssignmentConfig,
) -> RelevanceBreakdown {
    let words = slide_words(slide);
    let pages = estimated_pages(document_text, config.chars_per_page);
    score_words(&words, figure, pages, config)
}

/// Score against a pre-tokenised slide. The matcher tokenises each slide
/// once and reuses the set for every figure.
pub(crate) fn score_words(
    words: &HashSet<String>,
    figure: &Figure,
    estimated_pages: u64,
    config: &AssignmentConfig,
) -> RelevanceBreakdown {
    let keyword = keyword_score(words, &config.vocabulary);
    let size = (figure.area() / config.reference_area()).min(1.0);
    let distance = (i64::from(figure.page_number) - estimated_pages as i64).unsigned_abs();
    let context = 1.0 / (1.0 + distance as f64);

    let w = config.weights;
    let mut relevance = w.keyword * keyword + w.size * size + w.context * context;

    let boosted = config.boost_terms.iter().any(|t| words.contains(t));
    if boosted {
        relevance *= config.boost_factor;
    }
    let relevance = relevance.clamp(0.0, 1.0);

    debug!(
        "Figure on page {}: keyword={:.2} size={:.2} context={:.2} boosted={} → relevance={:.2}",
        figure.page_number, keyword, size, context, boosted, relevance
    );

    RelevanceBreakdown {
        keyword,
        size,
        context,
        boosted,
        relevance,
    }
}

fn keyword_score(words: &HashSet<String>, vocabulary: &[String]) -> f64 {
    if vocabulary.is_empty() {
        return 0.0;
    }
    let hits = vocabulary.iter().filter(|t| words.contains(*t)).count();
    hits as f64 / vocabulary.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AssignmentConfig {
        AssignmentConfig::default()
    }

    fn figure(page: u32, w: i64, h: i64) -> Figure {
        Figure::new(page, w, h, Vec::new())
    }

    #[test]
    fn tokenises_across_bullets_and_case() {
        let s = Slide::new(1, "System Architecture", "• overview of the pipeline\n•Data-flow");
        let words = slide_words(&s);
        for w in ["system", "architecture", "overview", "pipeline", "data", "flow"] {
            assert!(words.contains(w), "missing {w}: {words:?}");
        }
        assert!(!words.iter().any(|w| w.contains('•')));
    }

    #[test]
    fn estimated_pages_floors_at_one() {
        assert_eq!(estimated_pages("", 4000), 1);
        assert_eq!(estimated_pages(&"x".repeat(3999), 4000), 1);
        assert_eq!(estimated_pages(&"x".repeat(12_000), 4000), 3);
    }

    #[test]
    fn estimated_pages_counts_chars_not_bytes() {
        // 4000 two-byte characters is one page, not two.
        assert_eq!(estimated_pages(&"é".repeat(4000), 4000), 1);
    }

    #[test]
    fn system_architecture_scenario() {
        let s = Slide::new(1, "System Architecture", "• overview of the pipeline");
        let text = "a".repeat(4000);
        let b = score_breakdown(&s, &figure(1, 800, 600), &text, &config());

        assert!((b.keyword - 2.0 / 17.0).abs() < 1e-12);
        assert_eq!(b.size, 1.0);
        assert_eq!(b.context, 1.0);
        assert!(!b.boosted);
        let expected = 0.5 * (2.0 / 17.0) + 0.3 + 0.2;
        assert!((b.relevance - expected).abs() < 1e-12);
        assert!((b.relevance - 0.559).abs() < 1e-3);
    }

    #[test]
    fn size_term_caps_at_one() {
        let s = Slide::new(1, "", "");
        let b = score_breakdown(&s, &figure(1, 4000, 3000), "", &config());
        assert_eq!(b.size, 1.0);
        let half = score_breakdown(&s, &figure(1, 400, 600), "", &config());
        assert!((half.size - 0.5).abs() < 1e-12);
    }

    #[test]
    fn non_positive_dimensions_score_zero_size() {
        let s = Slide::new(1, "Data", "");
        for (w, h) in [(0, 600), (800, 0), (-800, 600), (-1, -1)] {
            let b = score_breakdown(&s, &figure(1, w, h), "", &config());
            assert_eq!(b.size, 0.0, "{w}x{h}");
        }
    }

    #[test]
    fn context_decays_with_page_distance() {
        let s = Slide::new(1, "", "");
        let text = "a".repeat(4000 * 5);
        let on = score_breakdown(&s, &figure(5, 10, 10), &text, &config());
        let off = score_breakdown(&s, &figure(2, 10, 10), &text, &config());
        assert_eq!(on.context, 1.0);
        assert!((off.context - 0.25).abs() < 1e-12);
    }

    #[test]
    fn empty_document_text_degrades_gracefully() {
        let s = Slide::new(1, "", "");
        let b = score_breakdown(&s, &figure(1, 10, 10), "", &config());
        assert_eq!(b.context, 1.0);
        let far = score_breakdown(&s, &figure(3, 10, 10), "", &config());
        assert!((far.context - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn explicit_mention_boosts() {
        let plain = Slide::new(1, "Results", "• accuracy improves");
        let mention = Slide::new(1, "Results", "• see the figure below");
        let f = figure(1, 400, 300);
        let a = score_breakdown(&plain, &f, "", &config());
        let b = score_breakdown(&mention, &f, "", &config());
        assert!(!a.boosted);
        assert!(b.boosted);
        // "figure" is also a vocabulary term, so the keyword term grows too.
        let unboosted = 0.5 * b.keyword + 0.3 * b.size + 0.2 * b.context;
        assert!((b.relevance - unboosted * 1.2).abs() < 1e-12);
    }

    #[test]
    fn boost_requires_whole_word() {
        let s = Slide::new(1, "Configured figures", "diagrams everywhere");
        let b = score_breakdown(&s, &figure(1, 10, 10), "", &config());
        assert!(!b.boosted);
    }

    #[test]
    fn score_is_clamped_to_one() {
        let body = crate::config::DEFAULT_VOCABULARY.join(" ");
        let s = Slide::new(1, "Figure", body);
        let b = score_breakdown(&s, &figure(1, 800, 600), "", &config());
        assert_eq!(b.keyword, 1.0);
        assert_eq!(b.relevance, 1.0);
    }

    #[test]
    fn score_stays_in_bounds() {
        let slides = [
            Slide::new(1, "", ""),
            Slide::new(2, "Figure diagram", "system model data graph chart"),
            Slide::new(3, "Intro", "• welcome"),
        ];
        let figures = [
            figure(1, 0, 0),
            figure(1, 10_000, 10_000),
            figure(40, 300, 200),
            figure(u32::MAX, -5, 7),
        ];
        let long = "x".repeat(100_000);
        for s in &slides {
            for f in &figures {
                for text in ["", "short", long.as_str()] {
                    let v = score(s, f, text, &config());
                    assert!((0.0..=1.0).contains(&v), "{v}");
                }
            }
        }
    }

    #[test]
    fn score_is_deterministic() {
        let s = Slide::new(1, "Network analysis", "• comparison of flow results");
        let f = figure(2, 640, 480);
        let text = "y".repeat(9000);
        let a = score(&s, &f, &text, &config());
        let b = score(&s, &f, &text, &config());
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn custom_vocabulary_changes_keyword_term() {
        let c = AssignmentConfig::builder()
            .vocabulary(["pipeline", "overview"])
            .build()
            .unwrap();
        let s = Slide::new(1, "System Architecture", "• overview of the pipeline");
        let b = score_breakdown(&s, &figure(1, 10, 10), "", &c);
        assert_eq!(b.keyword, 1.0);
    }
}
