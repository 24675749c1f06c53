use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::config::ConfirmStyle;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::spans_width;

const NAVIGATE_HINTS: &str = "a add  e edit  space toggle  d delete  tab filter  q quit";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    match app.mode {
        Mode::Confirm if app.config.confirm_style == ConfirmStyle::Prompt => {
            if let Some(request) = &app.confirm {
                spans.push(Span::styled(
                    format!(" {} y/n", request.prompt()),
                    Style::default().fg(app.theme.red).bg(bg),
                ));
            }
        }
        Mode::Navigate => {
            if let Some(failure) = &app.save_failure {
                let text = format!(" {}: {} (r retry, Esc dismiss)", failure.title(), failure);
                spans.push(Span::styled(
                    unicode::truncate_to_width(&text, width),
                    Style::default().fg(app.theme.red).bg(bg),
                ));
            } else if let Some(message) = &app.status_message {
                spans.push(Span::styled(
                    format!(" {}", message),
                    Style::default().fg(app.theme.text).bg(bg),
                ));
            }

            // Key hints, right-aligned when they fit
            if app.config.show_key_hints {
                let hint_width = unicode::display_width(NAVIGATE_HINTS) + 1;
                let content_width = spans_width(&spans);
                if content_width + hint_width < width {
                    let padding = width - content_width - hint_width;
                    spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
                    spans.push(Span::styled(
                        NAVIGATE_HINTS,
                        Style::default().fg(app.theme.dim).bg(bg),
                    ));
                }
            }
        }
        _ => {}
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::notice::Notice;
    use crate::tui::render::test_helpers::*;

    fn render_row(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn navigate_shows_hints() {
        let app = app_with_tasks(&[]);
        assert!(render_row(&app).ends_with("q quit"));
    }

    #[test]
    fn hints_can_be_hidden() {
        let mut app = app_with_tasks(&[]);
        app.config.show_key_hints = false;
        assert_eq!(render_row(&app), "");
    }

    #[test]
    fn save_failure_offers_retry() {
        let mut app = app_with_tasks(&[]);
        app.save_failure = Some(Notice::SaveFailed("disk full".into()));
        let out = render_row(&app);
        assert!(out.starts_with(" Save failed: disk full (r retry, Esc dismiss)"));
    }

    #[test]
    fn prompt_style_asks_in_status_row() {
        let mut app = app_with_tasks(&[("Buy milk", false)]);
        app.config.confirm_style = ConfirmStyle::Prompt;
        app.request_delete();
        assert_eq!(render_row(&app), " Delete \"Buy milk\"? y/n");
    }
}
