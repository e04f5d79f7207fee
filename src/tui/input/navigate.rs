use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::compose::ComposerField;
use crate::tui::app::{App, Focus};

/// Keys while the recipe list has focus
pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    let count = app.store.len();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => {
            if app.cursor + 1 < count {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.cursor = count.saturating_sub(1),
        KeyCode::Enter => app.open_selected_detail(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('s') => app.set_focus(Focus::Suggest),
        KeyCode::Char('a') => app.set_focus(Focus::Composer(ComposerField::Title)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use crate::tui::render::test_helpers::*;

    fn press(app: &mut App, code: KeyCode) {
        handle_navigate(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn many_app() -> App {
        app_with(
            (1..=5)
                .map(|i| manual_recipe(i, &format!("Recipe {i}"), "desc"))
                .collect(),
        )
    }

    #[test]
    fn cursor_moves_within_bounds() {
        let mut app = many_app();
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.cursor, 0);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor, 2);
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.cursor, 4);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.cursor, 4);
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn empty_list_keys_are_harmless() {
        let mut app = app_with(vec![]);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('G'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.cursor, 0);
        assert!(!app.detail.is_open());
    }

    #[test]
    fn delete_removes_selected() {
        let mut app = many_app();
        app.cursor = 4;
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.store.len(), 4);
        assert_eq!(app.cursor, 3);
        assert!(app.store.recipes().iter().all(|r| r.title != "Recipe 5"));
    }

    #[test]
    fn shortcuts_move_focus() {
        let mut app = many_app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.focus, Focus::Suggest);

        app.set_focus(Focus::List);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.focus, Focus::Composer(ComposerField::Title));
    }

    #[test]
    fn q_quits_and_question_opens_help() {
        let mut app = many_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
