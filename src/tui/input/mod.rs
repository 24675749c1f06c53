mod confirm;
mod editor;
mod navigate;

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use confirm::handle_confirm;
use editor::handle_editor;
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    // A fading delete lands before anything else can touch the list
    app.finish_fade();
    app.status_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    let key = normalize_key(key);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Editor => handle_editor(app, key),
        Mode::Confirm => handle_confirm(app, key, Instant::now()),
        Mode::Notice => handle_notice(app, key),
    }
}

/// Shift+letter arrives as lowercase with SHIFT on some terminals
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
        && c.is_ascii_lowercase()
    {
        key.code = KeyCode::Char(c.to_ascii_uppercase());
    }
    key
}

fn handle_notice(app: &mut App, key: KeyEvent) {
    if matches!(
        key.code,
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q')
    ) {
        app.dismiss_notice();
    }
}
