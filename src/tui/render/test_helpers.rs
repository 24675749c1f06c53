use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::MemoryStorage;
use crate::model::category::Category;
use crate::model::config::AppConfig;
use crate::ops::store::TaskStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen for `app`
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _| super::render(frame, app))
}

/// An App over in-memory storage holding `(text, completed)` tasks, all in
/// the default category.
pub fn app_with_tasks(tasks: &[(&str, bool)]) -> App {
    app_with_config(tasks, AppConfig::default())
}

pub fn app_with_config(tasks: &[(&str, bool)], config: AppConfig) -> App {
    let mut store = TaskStore::load(MemoryStorage::new()).unwrap();
    for (i, (text, completed)) in tasks.iter().enumerate() {
        store.add(*text, &Category::default()).unwrap();
        if *completed {
            store.toggle_at(i).unwrap();
        }
    }
    App::new(store, config, PathBuf::from("/nonexistent"))
}
