use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::detail::RecipeDetail;
use crate::tui::app::App;

use super::helpers::{centered_rect_fixed, wrap_text};

const POPUP_W: u16 = 64;

/// Render the recipe detail modal over the current screen
pub fn render_detail_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(detail) = app.detail.detail() else {
        return;
    };

    let popup_w = POPUP_W.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let styled_lines = detail_lines(app, detail, inner_w);

    let popup_h = popup_height(styled_lines.len(), area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let lines: Vec<Line> = styled_lines
        .into_iter()
        .map(|(text, style)| Line::from(Span::styled(text, style)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title_bottom(Span::styled(
            " Esc close  j/k scroll ",
            Style::default().fg(app.theme.dim).bg(bg),
        ))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.detail_scroll, 0))
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

/// Content rows + 2 for borders, kept inside the screen
fn popup_height(content_rows: usize, screen_h: u16) -> u16 {
    u16::try_from(content_rows)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(screen_h.saturating_sub(2))
}

fn detail_lines(app: &App, detail: &RecipeDetail, inner_w: usize) -> Vec<(String, Style)> {
    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let link_style = Style::default()
        .fg(app.theme.cyan)
        .bg(bg)
        .add_modifier(Modifier::UNDERLINED);

    let mut out: Vec<(String, Style)> = Vec::new();
    for s in wrap_text(" ", &detail.title, inner_w) {
        out.push((s, header_style));
    }
    out.push((String::new(), text_style));
    for s in wrap_text(
        " ",
        &format!("Category: {} | Area: {}", detail.category, detail.area),
        inner_w,
    ) {
        out.push((s, text_style));
    }
    for s in wrap_text(" ", &detail.image, inner_w) {
        out.push((s, dim_style));
    }
    out.push((String::new(), text_style));

    out.push((" Instructions:".into(), label_style));
    for paragraph in detail.instructions.lines() {
        if paragraph.trim().is_empty() {
            out.push((String::new(), text_style));
            continue;
        }
        for s in wrap_text(" ", paragraph, inner_w) {
            out.push((s, text_style));
        }
    }

    if let Some(video) = &detail.video {
        out.push((String::new(), text_style));
        out.push((" Watch on YouTube:".into(), label_style));
        for s in wrap_text(" ", video, inner_w) {
            out.push((s, link_style));
        }
    }
    out
}
