use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ops::confirm::ConfirmChoice;
use crate::tui::app::App;
use crate::tui::icons::Glyph;
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

/// Render the delete confirmation popup with Cancel/Delete buttons
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(request) = &app.confirm else {
        return;
    };

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let popup_w: u16 = 44.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let button = |label: String, choice: ConfirmChoice| {
        let focused = app.confirm_focus == choice;
        let style = match (focused, choice) {
            (true, ConfirmChoice::Confirm) => Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.red)
                .add_modifier(Modifier::BOLD),
            (true, ConfirmChoice::Cancel) => Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD),
            (false, _) => Style::default().fg(app.theme.dim).bg(bg),
        };
        Span::styled(label, style)
    };

    let quoted = format!("\"{}\"", request.text);
    let lines = vec![
        Line::from(vec![
            Span::styled(" ", header_style),
            Span::styled(app.icons.get(Glyph::Trash), header_style),
            Span::styled(" Delete task?", header_style),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", unicode::truncate_to_width(&quoted, inner_w.saturating_sub(2))),
            text_style,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", text_style),
            button(
                format!(" {} Cancel ", app.icons.get(Glyph::Close)),
                ConfirmChoice::Cancel,
            ),
            Span::styled("  ", text_style),
            button(
                format!(" {} Delete ", app.icons.get(Glyph::Trash)),
                ConfirmChoice::Confirm,
            ),
        ]),
    ];

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let popup = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block).style(Style::default().bg(bg)), popup);
}
