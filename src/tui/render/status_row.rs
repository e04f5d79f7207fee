use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus, StatusMessage};
use crate::util::unicode;

use super::helpers::spans_width;

/// Render the status row (bottom of screen): the last message on the left,
/// key hints for the current focus on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = match &app.status {
        Some(StatusMessage::Alert(msg)) => vec![Span::styled(
            format!(" ! {}", msg),
            Style::default()
                .fg(app.theme.red)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )],
        Some(StatusMessage::Info(msg)) => vec![Span::styled(
            format!(" {}", msg),
            Style::default().fg(app.theme.green).bg(bg),
        )],
        None if app.detail.loading().is_some() => vec![Span::styled(
            " Loading recipe details...",
            Style::default().fg(app.theme.cyan).bg(bg),
        )],
        None => Vec::new(),
    };

    let hint = if app.detail.is_open() {
        "Esc close"
    } else {
        match app.focus {
            Focus::List => "Enter details  d delete  Tab forms  ? help",
            Focus::Suggest | Focus::Composer(_) => "Enter submit  Tab next  Esc list",
        }
    };
    let content_width = spans_width(&spans);
    let hint_width = unicode::display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn idle_list_hints() {
        let app = seeded_app();
        let hint = "Enter details  d delete  Tab forms  ? help";
        assert_eq!(render(&app), format!("{}{}", " ".repeat(80 - hint.len()), hint));
    }

    #[test]
    fn alert_is_shown() {
        let mut app = seeded_app();
        app.alert("Failed to load recipe details");
        let output = render(&app);
        assert!(output.starts_with(" ! Failed to load recipe details"));
        assert!(output.ends_with("? help"));
    }

    #[test]
    fn detail_lookup_in_flight() {
        let mut app = seeded_app();
        app.open_selected_detail();
        assert!(render(&app).starts_with(" Loading recipe details..."));
    }
}
