use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

/// Help overlay intercepts all keys; only ? and Esc close it
pub(super) fn handle_help(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
        app.show_help = false;
    }
}

/// Detail modal: close or scroll
pub(super) fn handle_detail(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_detail(),
        KeyCode::Char('j') | KeyCode::Down => {
            app.detail_scroll = app.detail_scroll.saturating_add(1).min(detail_scroll_max(app));
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.detail_scroll = 0,
        _ => {}
    }
}

/// Rough upper bound for scrolling: one row per instruction line plus the header rows
fn detail_scroll_max(app: &App) -> u16 {
    app.detail
        .detail()
        .map_or(0, |d| d.instructions.lines().count().saturating_add(8))
        .min(u16::MAX as usize) as u16
}
