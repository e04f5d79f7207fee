use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Word-wrap `text` into lines of at most `max_width` cells.
/// Every line (including the first) is prefixed with `indent`. Words wider
/// than a line are left whole.
pub(super) fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_w = unicode::display_width(indent);
    let mut lines = Vec::new();
    let mut current = indent.to_string();
    let mut current_w = indent_w;

    for word in text.split_whitespace() {
        let word_w = unicode::display_width(word);
        let space = if current_w == indent_w { 0 } else { 1 };
        if current_w + space + word_w > max_width && current_w > indent_w {
            lines.push(std::mem::replace(&mut current, indent.to_string()));
            current_w = indent_w;
        }
        if current_w > indent_w {
            current.push(' ');
            current_w += 1;
        }
        current.push_str(word);
        current_w += word_w;
    }
    if current_w > indent_w || lines.is_empty() {
        lines.push(current);
    }
    lines
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Spans for a single-line text input `width` cells wide.
///
/// Unfocused inputs show the start of the text (or `placeholder` in
/// `placeholder_style` when empty). Focused ones scroll so the cursor stays
/// visible and draw it as a reversed cell, or `▌` at the end of the text.
pub(super) fn input_spans<'a>(
    text: &'a str,
    cursor: Option<usize>,
    width: usize,
    style: Style,
    placeholder: &'a str,
    placeholder_style: Style,
) -> Vec<Span<'a>> {
    let Some(cursor) = cursor else {
        if text.is_empty() {
            return vec![Span::styled(
                unicode::truncate_to_width(placeholder, width),
                placeholder_style,
            )];
        }
        return vec![Span::styled(unicode::truncate_to_width(text, width), style)];
    };

    let cursor = cursor.min(text.len());
    // One cell is kept for the cursor itself
    let start = unicode::tail_start(text, cursor, width.saturating_sub(1));
    let mut spans = vec![Span::styled(&text[start..cursor], style)];

    match unicode::next_grapheme_boundary(text, cursor) {
        Some(end) => {
            spans.push(Span::styled(
                &text[cursor..end],
                style.add_modifier(Modifier::REVERSED),
            ));
            let used = unicode::display_width(&text[start..end]);
            let rest = unicode::truncate_to_width(&text[end..], width.saturating_sub(used));
            spans.push(Span::styled(rest, style));
        }
        None => spans.push(Span::styled("\u{258C}", style)),
    }
    spans
}
