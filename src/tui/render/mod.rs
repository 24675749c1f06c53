pub mod confirm_popup;
pub mod editor_modal;
pub mod filter_bar;
pub mod helpers;
pub mod notice_popup;
pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::model::config::ConfirmStyle;

use super::app::{App, Mode};
use super::theme::Theme;

/// Draw one frame: filter bar, task list, status row, then popups
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: filter bar (2 rows) | task list | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // filter tabs + separator
            Constraint::Min(1),    // task list
            Constraint::Length(1), // status row
        ])
        .split(area);

    filter_bar::render_filter_bar(frame, app, chunks[0]);
    task_list::render_task_list(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    // Popups (rendered on top of everything)
    match app.mode {
        Mode::Editor => editor_modal::render_editor_modal(frame, app, area),
        Mode::Confirm if app.config.confirm_style == ConfirmStyle::Overlay => {
            confirm_popup::render_confirm_popup(frame, app, area)
        }
        Mode::Notice => notice_popup::render_notice_popup(frame, app, area),
        _ => {}
    }
}

/// Frame shown until config and tasks have loaded: background only
pub fn render_loading(frame: &mut Frame, theme: &Theme) {
    let bg_style = Style::default().bg(theme.background);
    frame.render_widget(Block::default().style(bg_style), frame.area());
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    #[test]
    fn loading_frame_is_blank() {
        let out = render_to_string(TERM_W, TERM_H, |frame, _| {
            render_loading(frame, &Theme::default())
        });
        assert_eq!(out, "");
    }

    #[test]
    fn full_screen_shows_bar_list_and_hints() {
        let mut app = app_with_tasks(&[("Buy milk", false), ("Read book", true)]);
        let out = render_app(&mut app);
        assert!(out.contains("All (2)"));
        assert!(out.contains("Buy milk"));
        assert!(out.contains("Read book"));
        assert!(out.contains("a add"));
    }

    #[test]
    fn overlay_only_in_overlay_style() {
        let mut app = app_with_tasks(&[("Buy milk", false)]);
        app.request_delete();
        let out = render_app(&mut app);
        assert!(out.contains("Cancel"));
        assert!(out.contains("Delete"));

        app.config.confirm_style = ConfirmStyle::Prompt;
        let out = render_app(&mut app);
        assert!(out.contains("Delete \"Buy milk\"? y/n"));
        assert!(!out.contains("Cancel"));
    }
}
