//! Text Measurement
//!
//! Row-based measurement of slide text for the headless host. One row per
//! wrapped line. Column widths follow `unicode-width`: wide characters (CJK,
//! emoji) take two columns, combining marks none.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Column width of a single character. Control characters take none.
fn char_width(c: char) -> u16 {
    c.width().map_or(0, |w| w as u16)
}

/// Display width of a string in columns.
pub fn string_width(s: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(s)).unwrap_or(u16::MAX)
}

/// Number of rows `text` occupies when wrapped at `available_width` columns.
///
/// Zero for empty text, at least one otherwise.
pub fn measure_text_height(text: &str, available_width: u16) -> u16 {
    if text.is_empty() {
        return 0;
    }

    if available_width == 0 {
        return 1;
    }

    let mut lines = 0u16;
    let mut current_line_width = 0u16;

    for c in text.chars() {
        if c == '\n' {
            lines = lines.saturating_add(1);
            current_line_width = 0;
            continue;
        }

        let w = char_width(c);
        if current_line_width + w > available_width && current_line_width > 0 {
            lines = lines.saturating_add(1);
            current_line_width = w;
        } else {
            current_line_width += w;
        }
    }

    if current_line_width > 0 || !text.ends_with('\n') {
        lines = lines.saturating_add(1);
    }

    lines
}
