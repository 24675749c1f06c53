use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::filter::FilterMode;
use crate::tui::app::App;
use crate::tui::icons::Glyph;
use crate::util::unicode;

use super::helpers::pad_to_width;

/// Render the filtered task list, one row per task
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let visible_height = area.height as usize;
    let width = area.width as usize;

    let count = app.visible().len();
    if count == 0 {
        let message = match app.filter {
            FilterMode::All => " No tasks yet. Press a to add one.",
            FilterMode::Pending => " No pending tasks",
            FilterMode::Completed => " No completed tasks",
        };
        let empty = Paragraph::new(message).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    // Keep the cursor on screen
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if visible_height > 0 && app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor + 1 - visible_height;
    }

    let app = &*app;
    let lines: Vec<Line> = app
        .visible()
        .into_iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible_height)
        .map(|(i, task)| {
            let is_cursor = i == app.cursor;
            let fading = app.is_fading(task.id);
            let row_bg = if is_cursor { app.theme.selection_bg } else { bg };
            let base = Style::default().bg(row_bg);

            let marker = if fading {
                Span::styled(app.icons.get(Glyph::Trash), base.fg(app.theme.red))
            } else if is_cursor {
                Span::styled(app.icons.get(Glyph::Selected), base.fg(app.theme.highlight))
            } else {
                Span::styled(" ", base)
            };
            let check_style = if task.completed {
                base.fg(app.theme.green)
            } else {
                base.fg(app.theme.dim)
            };
            let mut text_style = if task.completed {
                base.fg(app.theme.dim).add_modifier(Modifier::CROSSED_OUT)
            } else if is_cursor {
                base.fg(app.theme.text_bright).add_modifier(Modifier::BOLD)
            } else {
                base.fg(app.theme.text)
            };
            let mut category_style = base.fg(app.theme.task_color(task));
            if fading {
                text_style = text_style.fg(app.theme.dim).add_modifier(Modifier::DIM);
                category_style = category_style.fg(app.theme.dim);
            }

            // " ▸ [✓] text ... Category "
            let category = format!(" {} ", task.category);
            let fixed = 1 + 1 + 1 + 3 + 1 + unicode::display_width(&category);
            let text = unicode::truncate_to_width(&task.text, width.saturating_sub(fixed));

            let mut spans = vec![
                Span::styled(" ", base),
                marker,
                Span::styled(" ", base),
                Span::styled(app.icons.checkbox(task.completed), check_style),
                Span::styled(" ", base),
                Span::styled(text, text_style),
            ];
            pad_to_width(&mut spans, width.saturating_sub(unicode::display_width(&category)), base);
            spans.push(Span::styled(category, category_style));
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
