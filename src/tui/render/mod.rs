pub mod detail_view;
pub mod forms;
pub mod help_overlay;
mod helpers;
pub mod recipe_list;
pub mod status_row;
#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;

/// Main render function: lays out the screen and calls the sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header | suggestion bar | composer | recipe list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // suggestion bar
            Constraint::Length(5), // composer
            Constraint::Min(1),    // recipe list
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    forms::render_suggestion_bar(frame, app, chunks[1]);
    forms::render_composer(frame, app, chunks[2]);
    recipe_list::render_recipe_list(frame, app, chunks[3]);

    // Detail modal (rendered on top of the list)
    if app.detail.is_open() {
        detail_view::render_detail_popup(frame, app, area);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, chunks[4]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title = Span::styled(
        " Recipe Sharing App",
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    );
    let count = Span::styled(
        format!("  {} recipes", app.store.len()),
        Style::default().fg(app.theme.dim).bg(bg),
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![title, count])).style(Style::default().bg(bg)),
        area,
    );
}
