//! Bullet normalisation for slide bodies.
//!
//! Slide generators mix `-`, `*` and `•` markers, forget the space after a
//! bullet, or return every point on one line. Renderers expect one `• point`
//! per line, so bodies are normalised before scoring and output.
//!
//! Rules, in order:
//! 1. Trim each line and drop blank ones.
//! 2. `-`/`*` markers become `• `; `•x` becomes `• x`.
//! 3. An unmarked line longer than 10 characters that ends with `.` is a
//!    sentence and gets a `• ` prefix.
//! 4. If only one line remains and it holds several `•`, split on them.
//! 5. Otherwise a single line containing `.` or `;` is split into sentences.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_BULLET_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"•\s*").unwrap());
static RE_SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.;]\s+").unwrap());

/// Normalise `content` to one `• point` per line.
pub fn format_slide_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = content
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(normalise_line)
        .collect();

    if lines.len() == 1 {
        let single = lines[0].clone();
        if single.matches('•').count() > 1 {
            lines = RE_BULLET_SPLIT
                .split(&single)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(|p| format!("• {p}"))
                .collect();
        } else if single.contains('.') || single.contains(';') {
            let body = single.strip_prefix("• ").unwrap_or(&single);
            lines = RE_SENTENCE_SPLIT
                .split(body)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| format!("• {s}"))
                .collect();
        }
    }

    lines.join("\n")
}

fn normalise_line(line: &str) -> String {
    if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('*')) {
        return format!("• {}", rest.trim());
    }
    if line.starts_with('•') {
        if line.starts_with("• ") {
            return line.to_string();
        }
        return line.replacen('•', "• ", 1);
    }
    if line.chars().count() > 10 && line.ends_with('.') {
        return format!("• {line}");
    }
    line.to_string()
}
