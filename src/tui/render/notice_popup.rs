use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::tui::icons::Glyph;

use super::helpers::centered_rect_fixed;

/// Render a one-shot notice, e.g. after completing a task
pub fn render_notice_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(notice) = &app.notice else {
        return;
    };

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.green)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" ", header_style),
            Span::styled(app.icons.get(Glyph::Checkmark), header_style),
            Span::styled(format!(" {}", notice.title()), header_style),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", notice),
            Style::default().fg(app.theme.text).bg(bg),
        )),
    ];
    if app.config.show_key_hints {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Enter", Style::default().fg(app.theme.dim).bg(bg)),
            Span::styled(" close", Style::default().fg(app.theme.text).bg(bg)),
        ]));
    }

    let popup_w: u16 = 40.min(area.width.saturating_sub(2));
    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let popup = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.green).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block).style(Style::default().bg(bg)), popup);
}
