//! Small text utilities shared across the renderers
//!
//! Slugs come from the `slug` crate (lowercase, ASCII, hyphen-separated,
//! Unicode transliterated) with an extra `misc` fallback for inputs that
//! transliterate to nothing. Token estimation is the crate's only numeric
//! heuristic and deliberately crude; the chunk planner takes it as a plain
//! function so a real tokenizer can be swapped in.

/// Filesystem- and URL-safe slug for a tag or schema name
pub fn slugify(input: &str) -> String {
    let s = slug::slugify(input);
    if s.is_empty() {
        "misc".to_string()
    } else {
        s
    }
}

/// Escape free text for embedding in Markdown
///
/// Only `<` and `>` are rewritten; everything else passes through.
pub fn escape_markdown(input: &str) -> String {
    input.replace('<', "&lt;").replace('>', "&gt;")
}

/// Estimated token count: `ceil(chars / 4)`
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}
