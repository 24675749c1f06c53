use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

pub(super) fn handle_editor(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.cancel_editor(),
        (_, KeyCode::Enter) => app.confirm_editor(),

        // Category
        (_, KeyCode::Tab) | (_, KeyCode::Down) => app.editor.next_category(),
        (_, KeyCode::BackTab) | (_, KeyCode::Up) => app.editor.prev_category(),

        // Cursor
        (_, KeyCode::Left) => {
            let cursor = draft_text(app)
                .and_then(|text| prev_grapheme_boundary(text, app.edit_cursor))
                .unwrap_or(0);
            app.edit_cursor = cursor;
        }
        (_, KeyCode::Right) => {
            let cursor = draft_text(app).map(|text| {
                next_grapheme_boundary(text, app.edit_cursor).unwrap_or(text.len())
            });
            app.edit_cursor = cursor.unwrap_or(0);
        }
        (_, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => app.edit_cursor = 0,
        (_, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
            let end = draft_text(app).map_or(0, str::len);
            app.edit_cursor = end;
        }

        // Editing
        (_, KeyCode::Backspace) => {
            let cursor = app.edit_cursor;
            if let Some(draft) = app.editor.draft_mut()
                && let Some(start) = prev_grapheme_boundary(&draft.text, cursor)
            {
                draft.text.replace_range(start..cursor, "");
                app.edit_cursor = start;
            }
        }
        (_, KeyCode::Delete) => {
            let cursor = app.edit_cursor;
            if let Some(draft) = app.editor.draft_mut()
                && let Some(end) = next_grapheme_boundary(&draft.text, cursor)
            {
                draft.text.replace_range(cursor..end, "");
            }
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
            let cursor = app.edit_cursor;
            if let Some(draft) = app.editor.draft_mut() {
                draft.text.replace_range(..cursor, "");
                app.edit_cursor = 0;
            }
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            let cursor = app.edit_cursor;
            if let Some(draft) = app.editor.draft_mut() {
                draft.text.insert(cursor, c);
                app.edit_cursor = cursor + c.len_utf8();
            }
        }
        _ => {}
    }
}

fn draft_text(app: &App) -> Option<&str> {
    app.editor.draft().map(|d| d.text.as_str())
}
