//! Core data types shared by the scorer, the matcher and the deck pipeline.
//!
//! Every type here is `Serialize + Deserialize` so a deck can be handed to a
//! rendering layer (or written to disk) as JSON without an extra mapping
//! layer. Figure payloads travel as base64 strings in JSON.

use serde::{Deserialize, Serialize};

/// One slide of a generated presentation.
///
/// `visual_assignment` and `visual_kind` start unset and are written by
/// [`crate::assign::assign_figures`]. After the matcher runs,
/// `visual_assignment.is_some()` holds exactly when
/// `visual_kind == Some(VisualKind::PdfFigure)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// 1-indexed position in the deck, unique per deck.
    #[serde(alias = "slide_number")]
    pub sequence_number: u32,

    pub title: String,

    /// Slide text, usually bullet points separated by newlines.
    #[serde(default, alias = "content")]
    pub body: String,

    #[serde(default)]
    pub speaker_notes: String,

    /// Caption or art direction produced alongside the slide text.
    #[serde(default)]
    pub image_description: String,

    /// Figure chosen for this slide, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_assignment: Option<FigureRef>,

    /// Terminal rendering classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_kind: Option<VisualKind>,

    /// Best relevance the matcher saw for this slide. `None` when no figure
    /// was left to score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,

    /// Diagram suggestion for text-only slides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_suggestion: Option<VisualSuggestion>,
}

impl Slide {
    /// A slide with no visual decisions made yet.
    pub fn new(sequence_number: u32, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sequence_number,
            title: title.into(),
            body: body.into(),
            speaker_notes: String::new(),
            image_description: String::new(),
            visual_assignment: None,
            visual_kind: None,
            relevance: None,
            visual_suggestion: None,
        }
    }

    /// True once the matcher has classified this slide.
    pub fn is_classified(&self) -> bool {
        self.visual_kind.is_some()
    }

    /// Index of the assigned figure, if any.
    pub fn figure_index(&self) -> Option<usize> {
        self.visual_assignment.map(|FigureRef(i)| i)
    }
}

/// Zero-based index into the figure sequence the matcher was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FigureRef(pub usize);

/// How the rendering layer should present a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualKind {
    /// Backed by a figure extracted from the source document.
    PdfFigure,
    /// Text only.
    TextEmphasis,
}

impl VisualKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VisualKind::PdfFigure => "pdf_figure",
            VisualKind::TextEmphasis => "text_emphasis",
        }
    }
}

/// A figure extracted from the source document.
///
/// The engine only reads `page_number`, `width` and `height`. Dimensions are
/// signed so malformed upstream values survive deserialisation; the scorer
/// treats anything non-positive as zero area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    /// 1-indexed source page.
    #[serde(alias = "page")]
    pub page_number: u32,
    pub width: i64,
    pub height: i64,
    #[serde(default, alias = "data", with = "payload_base64")]
    pub payload: Vec<u8>,
}

impl Figure {
    pub fn new(page_number: u32, width: i64, height: i64, payload: Vec<u8>) -> Self {
        Self {
            page_number,
            width,
            height,
            payload,
        }
    }

    /// Pixel area, with negative dimensions counted as zero.
    pub fn area(&self) -> f64 {
        self.width.max(0) as f64 * self.height.max(0) as f64
    }
}

/// A visualisation idea for a slide that did not get a figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualSuggestion {
    /// Category key such as `architecture` or `data_flow`.
    pub category: String,
    pub description: String,
}

/// Summary counts for one matcher run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentStats {
    pub total_slides: usize,
    /// Slides that ended as [`VisualKind::PdfFigure`].
    pub figure_slides: usize,
    /// Slides that ended as [`VisualKind::TextEmphasis`].
    pub text_slides: usize,
    pub figures_available: usize,
    pub figures_unused: usize,
}

/// Serde adapter: `Vec<u8>` ⇄ standard base64 string.
pub(crate) mod payload_base64 {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let encoded = Option::<String>::deserialize(d)?.unwrap_or_default();
        STANDARD
            .decode(encoded.trim())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_slide_is_unclassified() {
        let s = Slide::new(1, "Intro", "• hello");
        assert!(!s.is_classified());
        assert_eq!(s.figure_index(), None);
    }

    #[test]
    fn visual_kind_serialises_snake_case() {
        assert_eq!(
            serde_json::to_string(&VisualKind::PdfFigure).unwrap(),
            "\"pdf_figure\""
        );
        assert_eq!(
            serde_json::to_string(&VisualKind::TextEmphasis).unwrap(),
            "\"text_emphasis\""
        );
        assert_eq!(VisualKind::TextEmphasis.as_str(), "text_emphasis");
    }

    #[test]
    fn slide_accepts_original_field_names() {
        let json = r#"{"slide_number": 4, "title": "Results", "content": "• accuracy up"}"#;
        let s: Slide = serde_json::from_str(json).expect("parse");
        assert_eq!(s.sequence_number, 4);
        assert_eq!(s.body, "• accuracy up");
        assert!(s.speaker_notes.is_empty());
    }

    #[test]
    fn figure_payload_is_base64_in_json() {
        let f = Figure::new(2, 10, 20, vec![0xde, 0xad, 0xbe, 0xef]);
        let json = serde_json::to_string(&f).unwrap();
        assert!(json.contains("\"3q2+7w==\""), "got: {json}");
    }

    #[test]
    fn figure_without_payload_deserialises() {
        let f: Figure =
            serde_json::from_str(r#"{"page": 3, "width": 640, "height": 480}"#).expect("parse");
        assert_eq!(f.page_number, 3);
        assert!(f.payload.is_empty());
    }

    #[test]
    fn negative_dimensions_have_zero_area() {
        assert_eq!(Figure::new(1, -5, 100, vec![]).area(), 0.0);
        assert_eq!(Figure::new(1, 10, 10, vec![]).area(), 100.0);
    }

    #[test]
    fn unassigned_fields_are_omitted() {
        let json = serde_json::to_string(&Slide::new(1, "a", "b")).unwrap();
        assert!(!json.contains("visual_kind"));
        assert!(!json.contains("visual_assignment"));
    }
}
