mod edit;
mod navigate;
mod popups;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

use edit::*;
use navigate::*;
use popups::*;

/// Handle a key event for the current focus
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        app.should_quit = true;
        return;
    }

    // Messages last until the next key
    app.status = None;

    // Overlays intercept all input
    if app.show_help {
        handle_help(app, key);
        return;
    }
    if app.detail.is_open() {
        handle_detail(app, key);
        return;
    }

    match key.code {
        KeyCode::Tab => {
            app.set_focus(app.focus.next());
            return;
        }
        KeyCode::BackTab => {
            app.set_focus(app.focus.prev());
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::List => handle_navigate(app, key),
        Focus::Suggest | Focus::Composer(_) => handle_edit(app, key),
    }
}

/// Handle a bracketed paste event (terminal sends pasted text as a single string).
/// Only lands in a focused input; newlines become spaces.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.show_help || app.detail.is_open() || text.is_empty() {
        return;
    }
    let clean = text.replace(['\r', '\n'], " ");
    insert_str(app, &clean);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::compose::ComposerField;
    use crate::tui::app::StatusMessage;
    use crate::tui::render::test_helpers::*;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn tab_cycles_through_sections() {
        let mut app = seeded_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Suggest);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Composer(ComposerField::Title));
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = seeded_app();
        app.set_focus(Focus::Suggest);
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
        assert!(app.suggestion.ingredient.is_empty());
    }

    #[test]
    fn any_key_clears_status() {
        let mut app = seeded_app();
        app.alert("boom");
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.status, None);
    }

    #[test]
    fn paste_goes_into_focused_input() {
        let mut app = seeded_app();
        app.set_focus(Focus::Composer(ComposerField::Description));
        handle_paste(&mut app, "Boil milk.\nAdd tea.");
        assert_eq!(app.composer.description, "Boil milk. Add tea.");

        app.set_focus(Focus::List);
        handle_paste(&mut app, "ignored");
        assert_eq!(app.composer.description, "Boil milk. Add tea.");
    }

    #[test]
    fn composer_flow_adds_recipe() {
        let mut app = seeded_app();
        let before = app.store.len();
        app.set_focus(Focus::Composer(ComposerField::Title));
        type_str(&mut app, "Rasam");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Simmer tamarind.");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "https://img.example/rasam.jpg");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.len(), before + 1);
        let added = app.store.recipes().last().unwrap();
        assert_eq!(added.title, "Rasam");
        assert_eq!(added.description, "Simmer tamarind.");
        assert_eq!(added.image, "https://img.example/rasam.jpg");
        assert!(app.composer.title.is_empty());
        assert_eq!(app.status, Some(StatusMessage::Info("Recipe added".into())));
    }

    #[test]
    fn suggestion_flow_adds_recipe_after_completion() {
        let mut app = seeded_app();
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "tomato");
        press(&mut app, KeyCode::Enter);
        assert!(app.suggestion.is_loading());

        // A second Enter while generating sends nothing
        press(&mut app, KeyCode::Enter);

        let done = app.worker().wait();
        app.apply(done);
        assert_eq!(app.store.recipes().last().unwrap().title, "Tomato Rice");
        assert!(app.worker().poll().is_empty());
        // The ingredient is kept for another try
        assert_eq!(app.suggestion.ingredient, "tomato");
    }
}
