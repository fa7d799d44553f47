//! Width-aware truncation of cell text
//!
//! Widths are measured in terminal-style display cells: most Latin glyphs
//! take one cell, CJK and fullwidth glyphs take two.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Glyph appended to a truncated prefix
pub const ELLIPSIS: char = '…';

/// Returned when no meaningful prefix fits
pub const SHORT_ELLIPSIS: &str = "...";

/// Display width of `text` in cells
#[inline]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Fit `text` into `max_width` display cells.
///
/// Text that already fits is returned unchanged. A budget of three cells or
/// less, or text of at most three chars that still overflows, collapses to
/// [`SHORT_ELLIPSIS`]. Otherwise the longest prefix that leaves room for
/// [`ELLIPSIS`] is kept.
pub fn truncate(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width <= 3 || text.chars().count() <= 3 {
        return SHORT_ELLIPSIS.to_string();
    }

    let budget = max_width - ELLIPSIS.width().unwrap_or(1);
    let mut used = 0;
    let mut end = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + ch.len_utf8();
    }

    let mut out = String::with_capacity(end + ELLIPSIS.len_utf8());
    out.push_str(&text[..end]);
    out.push(ELLIPSIS);
    out
}

/// Display-cell budget for a cell `cell_width` logical units wide
pub fn cell_text_budget(cell_width: f32) -> usize {
    ((cell_width.max(0.0) as usize) / 10).saturating_sub(1).max(4)
}
