use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::category::CATEGORIES;
use crate::tui::app::App;
use crate::tui::icons::Glyph;
use crate::util::unicode;

const LABEL: &str = "  Text      ";

/// Render the create/edit form as a centered popup
pub fn render_editor_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(draft) = app.editor.draft() else {
        return;
    };

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let (glyph, title) = if app.editor.is_editing() {
        (Glyph::Pencil, "Edit task")
    } else {
        (Glyph::Add, "New task")
    };

    // Keep the text cursor inside the field by scrolling the draft
    let field_w = inner_w.saturating_sub(unicode::display_width(LABEL) + 1);
    let cursor_col = unicode::byte_offset_to_display_col(&draft.text, app.edit_cursor);
    let skip_cols = cursor_col.saturating_sub(field_w);
    let shown = visible_slice(&draft.text, skip_cols, field_w);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(" ", header_style),
        Span::styled(app.icons.get(glyph), header_style),
        Span::styled(format!(" {}", title), header_style),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(LABEL, dim_style),
        Span::styled(
            shown,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg),
        ),
    ]));
    lines.push(Line::from(""));

    let mut category_spans = vec![Span::styled("  Category  ", dim_style)];
    for category in &CATEGORIES {
        let color = app.theme.category_color(category);
        let style = if draft.stale_category.is_none() && *category == draft.category {
            Style::default()
                .fg(bg)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color).bg(bg)
        };
        category_spans.push(Span::styled(format!(" {} ", category.name), style));
        category_spans.push(Span::styled(" ", text_style));
    }
    if let Some(name) = &draft.stale_category {
        category_spans.push(Span::styled(
            format!(" {} ", name),
            Style::default()
                .fg(bg)
                .bg(app.theme.dim)
                .add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(category_spans));
    lines.push(Line::from(""));

    if app.config.show_key_hints {
        lines.push(Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("Enter", dim_style),
            Span::styled(" save  ", text_style),
            Span::styled("Tab", dim_style),
            Span::styled(" category  ", text_style),
            Span::styled("Esc", dim_style),
            Span::styled(" cancel", text_style),
        ]));
    }

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let popup = super::helpers::centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block).style(Style::default().bg(bg)), popup);

    // Terminal cursor on the text field (row 3 of the popup: border, title, blank)
    let x = popup.x + 1 + unicode::display_width(LABEL) as u16 + (cursor_col - skip_cols) as u16;
    let y = popup.y + 3;
    if x < popup.x + popup.width && y < popup.y + popup.height {
        frame.set_cursor_position(Position::new(x, y));
    }
}

/// The part of `text` that starts `skip` columns in and spans `width` columns
fn visible_slice(text: &str, skip: usize, width: usize) -> String {
    use unicode_segmentation::UnicodeSegmentation;

    let mut col = 0;
    let mut out = String::new();
    for g in text.graphemes(true) {
        let w = unicode::display_width(g);
        if col >= skip && col + w <= skip + width {
            out.push_str(g);
        }
        col += w;
    }
    out
}
