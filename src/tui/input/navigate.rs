use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::filter::FilterMode;
use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // A pending save failure claims r and Esc
    if app.save_failure.is_some() {
        match key.code {
            KeyCode::Char('r') => {
                app.retry_save();
                return;
            }
            KeyCode::Esc => {
                app.dismiss_save_failure();
                return;
            }
            _ => {}
        }
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Cursor
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.move_cursor(isize::MAX),

        // Filter
        KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => app.set_filter(app.filter.next()),
        KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => {
            app.set_filter(app.filter.prev())
        }
        KeyCode::Char('1') => app.set_filter(FilterMode::All),
        KeyCode::Char('2') => app.set_filter(FilterMode::Pending),
        KeyCode::Char('3') => app.set_filter(FilterMode::Completed),

        // Task actions
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_create(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit(),
        KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use crate::ops::filter::FilterMode;
    use crate::tui::app::Mode;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::app_with_tasks;

    #[test]
    fn cursor_moves_within_bounds() {
        let mut app = app_with_tasks(&[("a", false), ("b", false), ("c", false)]);
        handle_key(&mut app, ch('k'));
        assert_eq!(app.cursor, 0);
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, ch('j'));
        assert_eq!(app.cursor, 2);
        handle_key(&mut app, ch('g'));
        assert_eq!(app.cursor, 0);
        handle_key(&mut app, ch('G'));
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn filter_keys() {
        let mut app = app_with_tasks(&[("a", false)]);
        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.filter, FilterMode::Pending);
        handle_key(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.filter, FilterMode::All);
        handle_key(&mut app, ch('3'));
        assert_eq!(app.filter, FilterMode::Completed);
        handle_key(&mut app, ch('1'));
        assert_eq!(app.filter, FilterMode::All);
    }

    #[test]
    fn action_keys_open_modes() {
        let mut app = app_with_tasks(&[("a", false)]);
        handle_key(&mut app, ch('a'));
        assert_eq!(app.mode, Mode::Editor);
        assert!(!app.editor.is_editing());
        handle_key(&mut app, key(KeyCode::Esc));

        handle_key(&mut app, ch('e'));
        assert_eq!(app.mode, Mode::Editor);
        assert!(app.editor.is_editing());
        handle_key(&mut app, key(KeyCode::Esc));

        handle_key(&mut app, ch('d'));
        assert_eq!(app.mode, Mode::Confirm);
    }

    #[test]
    fn actions_on_empty_list_do_nothing() {
        let mut app = app_with_tasks(&[]);
        handle_key(&mut app, ch('e'));
        handle_key(&mut app, ch('d'));
        handle_key(&mut app, ch(' '));
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn q_quits() {
        let mut app = app_with_tasks(&[]);
        handle_key(&mut app, ch('q'));
        assert!(app.should_quit);
    }
}
