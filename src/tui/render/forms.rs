use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::compose::ComposerField;
use crate::tui::app::{App, Focus};
use crate::util::unicode;

use super::helpers::{input_spans, spans_width};

const SUGGEST_BUTTON: &str = "[ Suggest Recipe with AI ]";
const GENERATING: &str = "Generating...";
/// Composer labels are padded to this width
const LABEL_W: usize = 14;

fn form_block(app: &App, title: &str, focused: bool) -> Block<'static> {
    let bg = app.theme.background;
    let border = if focused { app.theme.highlight } else { app.theme.dim };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border).bg(bg))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg))
}

/// Ingredient input plus the submit button, or `Generating...` while a
/// request is in flight
pub fn render_suggestion_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused = app.focus == Focus::Suggest;
    let block = form_block(app, "AI Recipe Suggestion", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (button, button_style) = if app.suggestion.is_loading() {
        (GENERATING, Style::default().fg(app.theme.yellow).bg(bg))
    } else {
        (
            SUGGEST_BUTTON,
            Style::default().fg(app.theme.green).bg(bg),
        )
    };

    let inner_w = inner.width as usize;
    let button_w = unicode::display_width(button);
    let input_w = inner_w.saturating_sub(button_w + 2);

    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    spans.extend(input_spans(
        &app.suggestion.ingredient,
        focused.then_some(app.edit_cursor),
        input_w.saturating_sub(1),
        Style::default().fg(app.theme.text_bright).bg(bg),
        "Enter an ingredient...",
        Style::default().fg(app.theme.dim).bg(bg),
    ));
    let used = spans_width(&spans);
    if used + button_w < inner_w {
        spans.push(Span::styled(
            " ".repeat(inner_w - used - button_w),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(button, button_style));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        inner,
    );
}

/// The three manual-entry fields, one per row
pub fn render_composer(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let focused_field = match app.focus {
        Focus::Composer(field) => Some(field),
        _ => None,
    };
    let block = form_block(app, "Add Recipe", focused_field.is_some());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input_w = (inner.width as usize).saturating_sub(LABEL_W + 1);
    let lines: Vec<Line> = ComposerField::ALL
        .into_iter()
        .map(|field| {
            let is_focused = focused_field == Some(field);
            let label_style = if is_focused {
                Style::default()
                    .fg(app.theme.highlight)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(app.theme.text).bg(bg)
            };
            let mut spans = vec![Span::styled(
                format!(" {:<width$}", field.label(), width = LABEL_W - 1),
                label_style,
            )];
            spans.extend(input_spans(
                app.composer.field(field),
                is_focused.then_some(app.edit_cursor),
                input_w,
                Style::default().fg(app.theme.text_bright).bg(bg),
                "",
                Style::default().bg(bg),
            ));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(bg)),
        inner,
    );
}
