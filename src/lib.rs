//! # figslide
//!
//! Assign figures extracted from a PDF to the slides generated from it.
//!
//! ## Why this crate?
//!
//! A slide deck generated from a paper reads better when the architecture
//! slide shows the paper's architecture figure. Upstream steps produce the
//! slides (from an LLM) and the figures (from the PDF); this crate decides
//! which slide gets which figure, and which slides stay text-only.
//!
//! ## Pipeline Overview
//!
//! ```text
//! DeckRequest (document text + slides + figures)
//!  │
//!  ├─ 1. Input      load and validate the request
//!  ├─ 2. Figures    decode payloads, probe dimensions, drop logos and icons
//!  ├─ 3. Format     one "• point" per line
//!  ├─ 4. Assign     score every (slide, figure) pair, match greedily
//!  ├─ 5. Suggest    diagram ideas for slides left without a figure
//!  └─ 6. Output     annotated slides + figure summaries + stats
//! ```
//!
//! ## Scoring
//!
//! `relevance = 0.5·keyword + 0.3·size + 0.2·context`, ×1.2 when the slide
//! says "figure" or "diagram", capped at 1.0. A slide takes its best unused
//! figure only when that score is strictly above the threshold (0.4).
//!
//! ## Quick Start
//!
//! ```rust
//! use figslide::{assign, AssignmentConfig, Figure, Slide, VisualKind};
//!
//! let slides = vec![Slide::new(1, "System Architecture", "• overview of the pipeline")];
//! let figures = vec![Figure::new(1, 800, 600, Vec::new())];
//! let document_text = "x".repeat(4000);
//!
//! let slides = assign(slides, &figures, &document_text, &AssignmentConfig::default());
//! assert_eq!(slides[0].visual_kind, Some(VisualKind::PdfFigure));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `figslide` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod assign;
pub mod config;
pub mod deck;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod progress;
pub mod relevance;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use assign::{assign, assign_figures};
pub use config::{AssignmentConfig, AssignmentConfigBuilder, ScoreWeights, DEFAULT_VOCABULARY};
pub use deck::{
    build_deck, build_deck_from_file, build_deck_to_file, export_figures, write_deck, DeckOutput,
    FigureSummary,
};
pub use error::{FigslideError, FigureError};
pub use model::{AssignmentStats, Figure, FigureRef, Slide, VisualKind, VisualSuggestion};
pub use pipeline::input::{load_request, DeckRequest, FigureInput};
pub use pipeline::parse::parse_slides;
pub use progress::{AssignmentProgressCallback, NoopProgressCallback, ProgressCallback};
pub use relevance::{score, score_breakdown, RelevanceBreakdown};
