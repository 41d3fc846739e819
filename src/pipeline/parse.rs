//! Parser for the plain-text slide format emitted by the slide generator.
//!
//! ```text
//! SLIDE_1:
//! TITLE: System Architecture
//! CONTENT:
//! • Encoder and decoder stacks
//! • Attention everywhere
//! VISUAL_TYPE: pdf_figure
//! VISUAL_DESCRIPTION: The model architecture
//! SPEAKER_NOTES: Let's start with the big picture.
//! ```
//!
//! Lines after a field header continue that field. `VISUAL_TYPE` is read
//! but discarded: whether a slide shows a figure is decided by the matcher,
//! not by the generator.

use crate::model::Slide;
use crate::pipeline::format::format_slide_content;
use tracing::debug;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Content,
    VisualType,
    VisualDescription,
    SpeakerNotes,
}

const HEADERS: [(&str, Field); 5] = [
    ("TITLE:", Field::Title),
    ("CONTENT:", Field::Content),
    ("VISUAL_TYPE:", Field::VisualType),
    ("VISUAL_DESCRIPTION:", Field::VisualDescription),
    ("SPEAKER_NOTES:", Field::SpeakerNotes),
];

/// Parse every `SLIDE_n:` block into a [`Slide`], numbered from 1 in order
/// of appearance. Text before the first block is ignored.
pub fn parse_slides(text: &str) -> Vec<Slide> {
    let slides: Vec<Slide> = text
        .split("SLIDE_")
        .skip(1)
        .enumerate()
        .map(|(i, block)| parse_block(i as u32 + 1, block))
        .collect();
    debug!("Parsed {} slides from generator text", slides.len());
    slides
}

fn parse_block(number: u32, block: &str) -> Slide {
    let mut title = String::new();
    let mut content = String::new();
    let mut description = String::new();
    let mut notes = String::new();
    let mut current: Option<Field> = None;

    for line in block.trim().lines().map(str::trim) {
        if let Some((field, value)) = match_header(line) {
            let value = value.trim().to_string();
            match field {
                Field::Title => title = value,
                Field::Content => content = value,
                Field::VisualType => {}
                Field::VisualDescription => description = value,
                Field::SpeakerNotes => notes = value,
            }
            current = Some(field);
            continue;
        }
        if line.is_empty() {
            continue;
        }
        match current {
            Some(Field::Content) => {
                if content.is_empty() {
                    content = line.to_string();
                } else if line.starts_with('•') {
                    content.push('\n');
                    content.push_str(line);
                } else {
                    content.push(' ');
                    content.push_str(line);
                }
            }
            Some(Field::VisualDescription) => {
                description.push(' ');
                description.push_str(line);
            }
            Some(Field::SpeakerNotes) => {
                notes.push(' ');
                notes.push_str(line);
            }
            _ => {}
        }
    }

    if title.is_empty() {
        title = format!("Slide {number}");
    }
    let mut slide = Slide::new(number, title, format_slide_content(content.trim()));
    slide.image_description = description.trim().to_string();
    slide.speaker_notes = notes.trim().to_string();
    slide
}

fn match_header(line: &str) -> Option<(Field, &str)> {
    HEADERS
        .iter()
        .find_map(|(prefix, field)| line.strip_prefix(prefix).map(|rest| (*field, rest)))
}
