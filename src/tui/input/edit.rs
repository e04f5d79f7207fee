use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus};
use crate::util::unicode;

/// Keys for the focused text input (ingredient or a composer field)
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(buffer) = app.focused_input() else {
        return;
    };
    let len = buffer.len();
    let cursor = app.edit_cursor.min(len);

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.set_focus(Focus::List),
        (_, KeyCode::Enter) => match app.focus {
            Focus::Suggest => app.submit_suggestion(),
            Focus::Composer(_) => app.submit_composer(),
            Focus::List => {}
        },
        (m, KeyCode::Left) if m.contains(KeyModifiers::CONTROL) => app.edit_cursor = 0,
        (m, KeyCode::Right) if m.contains(KeyModifiers::CONTROL) => app.edit_cursor = len,
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, cursor) {
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(buffer, cursor) {
                app.edit_cursor = next;
            }
        }
        (_, KeyCode::Home) => app.edit_cursor = 0,
        (_, KeyCode::End) => app.edit_cursor = len,
        // Kill to start of line
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            if let Some(buf) = app.focused_input_mut() {
                buf.drain(..cursor);
            }
            app.edit_cursor = 0;
        }
        // Word backspace (Alt or Ctrl)
        (m, KeyCode::Backspace)
            if m.contains(KeyModifiers::ALT) || m.contains(KeyModifiers::CONTROL) =>
        {
            let start = word_boundary_left(buffer, cursor);
            if let Some(buf) = app.focused_input_mut() {
                buf.drain(start..cursor);
            }
            app.edit_cursor = start;
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buffer, cursor) {
                if let Some(buf) = app.focused_input_mut() {
                    buf.drain(prev..cursor);
                }
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(buffer, cursor)
                && let Some(buf) = app.focused_input_mut()
            {
                buf.drain(cursor..next);
            }
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) if !c.is_control() => {
            let mut tmp = [0u8; 4];
            insert_str(app, c.encode_utf8(&mut tmp));
        }
        _ => {}
    }
}

/// Insert text at the cursor of the focused input
pub(super) fn insert_str(app: &mut App, text: &str) {
    let cursor = app.edit_cursor;
    let Some(buf) = app.focused_input_mut() else {
        return;
    };
    let at = cursor.min(buf.len());
    buf.insert_str(at, text);
    app.edit_cursor = at + text.len();
}

/// Start of the word before `pos`, skipping trailing whitespace first
fn word_boundary_left(s: &str, pos: usize) -> usize {
    let before = &s[..pos];
    let trimmed = before.trim_end();
    trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8())
}
