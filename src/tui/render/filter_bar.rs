use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::filter::{self, FilterMode};
use crate::tui::app::App;
use crate::tui::icons::Glyph;

/// Render the filter tabs with their counts, with a separator line below
pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    let separator = Paragraph::new("\u{2500}".repeat(chunks[1].width as usize))
        .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(separator, chunks[1]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let counts = filter::counts(app.store.tasks());
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    let mut spans: Vec<Span> = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            app.icons.get(Glyph::Checkmark),
            Style::default().fg(app.theme.green).bg(bg),
        ),
        Span::styled(
            " tareas ",
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        sep.clone(),
    ];

    for mode in FilterMode::ALL {
        let style = if mode == app.filter {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        spans.push(Span::styled(
            format!(" {} ({}) ", mode.label(), counts.get(mode)),
            style,
        ));
        spans.push(sep.clone());
    }

    let line = Line::from(spans);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
