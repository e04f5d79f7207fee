use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Focus};

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    // Context-sensitive help
    match app.focus {
        Focus::List => {
            lines.push(Line::from(Span::styled(" Recipes", header_style)));
            add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor up/down", key_style, desc_style);
            add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
            add_binding(&mut lines, " Enter", "Show recipe details", key_style, desc_style);
            add_binding(&mut lines, " d", "Delete recipe", key_style, desc_style);
            add_binding(&mut lines, " s", "Ask the AI", key_style, desc_style);
            add_binding(&mut lines, " a", "Add a recipe", key_style, desc_style);
        }
        Focus::Suggest | Focus::Composer(_) => {
            lines.push(Line::from(Span::styled(" Editing", header_style)));
            add_binding(&mut lines, " Enter", "Submit the form", key_style, desc_style);
            add_binding(&mut lines, " \u{2190}\u{2192}", "Move the cursor", key_style, desc_style);
            add_binding(&mut lines, " Home/End", "Start/end of input", key_style, desc_style);
            add_binding(&mut lines, " Esc", "Back to the list", key_style, desc_style);
        }
    }
    lines.push(Line::from(""));

    // Global keys
    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " Tab/S-Tab", "Next/previous section", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle help (from the list)", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit (from the list)", key_style, desc_style);
    add_binding(&mut lines, " Ctrl+C", "Quit (immediate)", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 14;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::compose::ComposerField;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn list_help() {
        let app = seeded_app();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(output.contains("Key Bindings"));
        assert!(output.contains("Delete recipe"));
        assert!(!output.contains("Submit the form"));
    }

    #[test]
    fn editing_help() {
        let mut app = seeded_app();
        app.set_focus(Focus::Composer(ComposerField::Title));
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_help_overlay(frame, &app, area);
        });
        assert!(output.contains("Submit the form"));
        assert!(!output.contains("Delete recipe"));
    }
}
