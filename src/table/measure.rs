//! Approximate text measurement for column auto-fit.
//!
//! Widths are modelled against a fixed reference font (14 px
//! sans-serif) using per-character advance classes, so auto-fit gives
//! stable, deterministic results everywhere. The model only has to
//! rank strings sensibly; it is not a rasterizer.

/// Advance of most lowercase glyphs at the reference size, in px.
const BASE_ADVANCE: f32 = 7.8;

/// Bold text runs slightly wider.
const BOLD_FACTOR: f32 = 1.08;

fn char_advance(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '!' | '\'' | '|' | '.' | ',' | ':' | ';' => 4.0,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '{' | '}' | ' ' => 5.2,
        'm' | 'w' | 'M' | 'W' | '@' => 12.0,
        c if c.is_ascii_uppercase() => 10.0,
        c if c.is_ascii_digit() => BASE_ADVANCE,
        _ => BASE_ADVANCE,
    }
}

/// Width of a string in reference-font pixels.
pub fn text_width(text: &str) -> f32 {
    text.chars().map(char_advance).sum()
}

/// Width of a string rendered bold (header labels).
pub fn bold_text_width(text: &str) -> f32 {
    text_width(text) * BOLD_FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longer_text_is_wider() {
        assert!(text_width("alice@example.com") > text_width("alice"));
        assert!(text_width("abc") > text_width(""));
    }

    #[test]
    fn test_narrow_vs_wide_glyphs() {
        assert!(text_width("iii") < text_width("www"));
        assert!(text_width("NAME") > text_width("name"));
    }

    #[test]
    fn test_bold_is_wider() {
        assert!(bold_text_width("EMAIL") > text_width("EMAIL"));
    }
}
