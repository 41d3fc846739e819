//! Diagram suggestions for slides that ended up without a figure.
//!
//! A text-only slide about an architecture or a data pipeline still benefits
//! from a drawn diagram. The first category whose keywords appear anywhere in
//! the lowercased body (substring match, so "systems" counts for "system")
//! wins, in the order listed in [`CATEGORIES`].

use crate::model::{Slide, VisualKind, VisualSuggestion};

/// Category key and its trigger keywords, in priority order.
pub const CATEGORIES: [(&str, &[&str]); 6] = [
    ("architecture", &["architecture", "system", "component", "module", "layer"]),
    ("algorithm", &["algorithm", "process", "steps", "procedure", "method"]),
    ("network", &["network", "connection", "protocol", "communication", "topology"]),
    ("data_flow", &["data", "flow", "pipeline", "processing", "transformation"]),
    ("model", &["model", "framework", "structure", "representation"]),
    ("comparison", &["comparison", "versus", "different", "contrast", "compare"]),
];

const EXCERPT_CHARS: usize = 100;

/// Suggest a diagram for `content`, or `None` if nothing technical shows up.
pub fn detect_technical_content(content: &str) -> Option<VisualSuggestion> {
    let lower = content.to_lowercase();
    let (category, _) = CATEGORIES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))?;
    Some(VisualSuggestion {
        category: category.to_string(),
        description: diagram_description(content, category),
    })
}

/// Attach suggestions to every text-only slide. Returns how many were added.
pub fn suggest_for_text_slides(slides: &mut [Slide]) -> usize {
    let mut added = 0;
    for slide in slides
        .iter_mut()
        .filter(|s| s.visual_kind == Some(VisualKind::TextEmphasis))
    {
        slide.visual_suggestion = detect_technical_content(&slide.body);
        if slide.visual_suggestion.is_some() {
            added += 1;
        }
    }
    added
}

fn diagram_description(content: &str, category: &str) -> String {
    let excerpt: String = content.chars().take(EXCERPT_CHARS).collect();
    match category {
        "architecture" => format!(
            "System architecture diagram showing the main components and their relationships described in: {excerpt}..."
        ),
        "algorithm" => format!(
            "Flowchart diagram illustrating the algorithm or process steps mentioned in: {excerpt}..."
        ),
        "network" => format!(
            "Network topology diagram representing the connections and protocols from: {excerpt}..."
        ),
        "data_flow" => format!(
            "Data flow diagram showing the data processing pipeline described in: {excerpt}..."
        ),
        "model" => format!(
            "Conceptual model diagram visualizing the framework or structure from: {excerpt}..."
        ),
        "comparison" => format!(
            "Comparison diagram contrasting different approaches mentioned in: {excerpt}..."
        ),
        _ => format!("Technical diagram illustrating concepts from: {excerpt}..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_category_wins() {
        // Mentions both a layer (architecture) and a pipeline (data_flow).
        let s = detect_technical_content("• Each layer feeds the pipeline").unwrap();
        assert_eq!(s.category, "architecture");
        assert!(s.description.starts_with("System architecture diagram"));
    }

    #[test]
    fn substring_matches_count() {
        let s = detect_technical_content("Compared approaches").unwrap();
        assert_eq!(s.category, "comparison");
    }

    #[test]
    fn plain_text_gets_nothing() {
        assert!(detect_technical_content("• Thank you for listening").is_none());
    }

    #[test]
    fn excerpt_is_truncated_on_chars() {
        let body = format!("network {}", "é".repeat(200));
        let s = detect_technical_content(&body).unwrap();
        assert_eq!(s.category, "network");
        let excerpt = s
            .description
            .rsplit(": ")
            .next()
            .unwrap()
            .trim_end_matches("...");
        assert_eq!(excerpt.chars().count(), 100);
    }

    #[test]
    fn only_text_slides_get_suggestions() {
        let mut a = Slide::new(1, "A", "• system overview");
        a.visual_kind = Some(VisualKind::PdfFigure);
        let mut b = Slide::new(2, "B", "• data pipeline");
        b.visual_kind = Some(VisualKind::TextEmphasis);
        let mut c = Slide::new(3, "C", "• thanks");
        c.visual_kind = Some(VisualKind::TextEmphasis);

        let mut slides = [a, b, c];
        assert_eq!(suggest_for_text_slides(&mut slides), 1);
        assert!(slides[0].visual_suggestion.is_none());
        assert_eq!(slides[1].visual_suggestion.as_ref().unwrap().category, "data_flow");
        assert!(slides[2].visual_suggestion.is_none());
    }
}
