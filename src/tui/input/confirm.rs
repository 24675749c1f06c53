use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::config::ConfirmStyle;
use crate::ops::confirm::ConfirmChoice;
use crate::tui::app::App;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent, now: Instant) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => app.answer_delete(ConfirmChoice::Confirm, now),
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.answer_delete(ConfirmChoice::Cancel, now)
        }
        _ if app.config.confirm_style == ConfirmStyle::Overlay => handle_buttons(app, key, now),
        _ => {}
    }
}

/// Cancel/Delete buttons of the overlay popup
fn handle_buttons(app: &mut App, key: KeyEvent, now: Instant) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.confirm_focus = ConfirmChoice::Cancel,
        KeyCode::Right | KeyCode::Char('l') => app.confirm_focus = ConfirmChoice::Confirm,
        KeyCode::Tab | KeyCode::BackTab => {
            app.confirm_focus = match app.confirm_focus {
                ConfirmChoice::Cancel => ConfirmChoice::Confirm,
                ConfirmChoice::Confirm => ConfirmChoice::Cancel,
            }
        }
        KeyCode::Enter => app.answer_delete(app.confirm_focus, now),
        _ => {}
    }
}
