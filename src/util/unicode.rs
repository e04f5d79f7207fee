use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate to at most `max_cells` cells, ending in `…` when cut.
/// Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let gw = display_width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset where the visible tail of `s` starts so that everything from
/// there up to `end` fits in `max_cells`. Used to scroll single-line inputs
/// so the cursor stays in view.
pub fn tail_start(s: &str, end: usize, max_cells: usize) -> usize {
    let end = end.min(s.len());
    let mut width = 0;
    let mut start = end;
    for (i, g) in s[..end].grapheme_indices(true).rev() {
        let gw = display_width(g);
        if width + gw > max_cells {
            break;
        }
        width += gw;
        start = i;
    }
    start
}

/// Next grapheme boundary after `byte_offset`, or None at the end
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    let len = s[byte_offset..].graphemes(true).next().map_or(0, str::len);
    Some(byte_offset + len)
}

/// Previous grapheme boundary before `byte_offset`, or None at the start
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
}
