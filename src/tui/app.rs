use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::read_config;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::storage::FileStorage;
use crate::model::config::{AppConfig, ConfirmStyle, UiConfig};
use crate::model::task::{Task, TaskId};
use crate::ops::confirm::{ConfirmChoice, DeleteRequest, resolve_delete};
use crate::ops::editor::{Editor, EditorOutcome};
use crate::ops::filter::{self, FilterMode};
use crate::ops::notice::Notice;
use crate::ops::store::TaskStore;

use super::icons::Icons;
use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Create/edit form is open
    Editor,
    /// A delete is waiting on y/n
    Confirm,
    /// A popup notice is shown
    Notice,
}

/// A confirmed delete whose row is fading out
#[derive(Debug, Clone)]
pub struct FadingDelete {
    pub request: DeleteRequest,
    pub deadline: Instant,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub config: UiConfig,
    pub theme: Theme,
    pub icons: Icons,
    pub data_dir: PathBuf,
    pub mode: Mode,
    pub should_quit: bool,
    pub filter: FilterMode,
    /// Cursor index into the visible (filtered) list
    pub cursor: usize,
    /// Scroll offset (first visible row)
    pub scroll_offset: usize,
    pub editor: Editor,
    /// Byte offset of the text cursor in the editor draft
    pub edit_cursor: usize,
    pub confirm: Option<DeleteRequest>,
    /// Focused button in the overlay confirmation
    pub confirm_focus: ConfirmChoice,
    pub fading: Option<FadingDelete>,
    pub notice: Option<Notice>,
    /// Last save failure, shown in the status row until retried or dismissed
    pub save_failure: Option<Notice>,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: TaskStore, config: AppConfig, data_dir: PathBuf) -> Self {
        let theme = Theme::from_config(&config.ui);
        let icons = Icons::new(config.ui.ascii_icons);
        App {
            store,
            config: config.ui,
            theme,
            icons,
            data_dir,
            mode: Mode::Navigate,
            should_quit: false,
            filter: FilterMode::default(),
            cursor: 0,
            scroll_offset: 0,
            editor: Editor::default(),
            edit_cursor: 0,
            confirm: None,
            confirm_focus: ConfirmChoice::Cancel,
            fading: None,
            notice: None,
            save_failure: None,
            status_message: None,
        }
    }

    /// Tasks under the current filter, in stored order
    pub fn visible(&self) -> Vec<&Task> {
        filter::visible(self.store.tasks(), self.filter)
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.visible().get(self.cursor).map(|t| t.id)
    }

    pub fn clamp_cursor(&mut self) {
        let count = self.visible().len();
        self.cursor = self.cursor.min(count.saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.visible().len();
        if count == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(count - 1);
    }

    /// Put the cursor on `id` if it is visible under the current filter
    fn select(&mut self, id: TaskId) {
        if let Some(i) = self.visible().iter().position(|t| t.id == id) {
            self.cursor = i;
        }
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        if self.filter == mode {
            return;
        }
        let selected = self.selected_id();
        self.filter = mode;
        self.cursor = 0;
        self.scroll_offset = 0;
        if let Some(id) = selected {
            self.select(id);
        }
    }

    // -----------------------------------------------------------------------
    // Toggle
    // -----------------------------------------------------------------------

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.store.toggle(id) {
            Ok(completed) => {
                if let Some(notice) = Notice::for_toggle(completed) {
                    self.notice = Some(notice);
                    self.mode = Mode::Notice;
                }
                self.clamp_cursor();
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        self.mode = Mode::Navigate;
    }

    // -----------------------------------------------------------------------
    // Editor
    // -----------------------------------------------------------------------

    pub fn open_create(&mut self) {
        self.editor.open_create();
        self.edit_cursor = 0;
        self.mode = Mode::Editor;
    }

    pub fn open_edit(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.editor.open_edit(&self.store, id) {
            Ok(()) => {
                self.edit_cursor = self.editor.draft().map_or(0, |d| d.text.len());
                self.mode = Mode::Editor;
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    pub fn confirm_editor(&mut self) {
        match self.editor.confirm(&mut self.store) {
            Ok(EditorOutcome::Rejected) => {}
            Ok(EditorOutcome::Created(id)) | Ok(EditorOutcome::Updated(id)) => {
                self.mode = Mode::Navigate;
                self.select(id);
                self.clamp_cursor();
            }
            Ok(EditorOutcome::Idle) => self.mode = Mode::Navigate,
            Err(e) => {
                self.mode = Mode::Navigate;
                self.status_message = Some(e.to_string());
            }
        }
    }

    pub fn cancel_editor(&mut self) {
        self.editor.cancel();
        self.mode = Mode::Navigate;
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    pub fn request_delete(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Some(task) = self.store.get(id) {
            self.confirm = Some(DeleteRequest::for_task(task));
            self.confirm_focus = ConfirmChoice::Cancel;
            self.mode = Mode::Confirm;
        }
    }

    /// Resolve the pending confirmation. With the overlay style and a
    /// non-zero fade, the removal lands once the fade deadline passes.
    pub fn answer_delete(&mut self, choice: ConfirmChoice, now: Instant) {
        self.mode = Mode::Navigate;
        let Some(request) = self.confirm.take() else {
            return;
        };
        if choice == ConfirmChoice::Cancel {
            return;
        }
        if self.config.confirm_style == ConfirmStyle::Overlay && self.config.fade_ms > 0 {
            self.fading = Some(FadingDelete {
                request,
                deadline: now + Duration::from_millis(self.config.fade_ms),
            });
        } else {
            self.apply_delete(&request);
        }
    }

    pub fn is_fading(&self, id: TaskId) -> bool {
        self.fading.as_ref().is_some_and(|f| f.request.id == id)
    }

    /// Land a fading delete now
    pub fn finish_fade(&mut self) {
        if let Some(fading) = self.fading.take() {
            self.apply_delete(&fading.request);
        }
    }

    fn apply_delete(&mut self, request: &DeleteRequest) {
        match resolve_delete(&mut self.store, request, ConfirmChoice::Confirm) {
            Ok(_) => self.clamp_cursor(),
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Saves
    // -----------------------------------------------------------------------

    pub fn retry_save(&mut self) {
        if self.save_failure.take().is_none() {
            return;
        }
        match self.store.retry_save() {
            Ok(()) => self.status_message = Some("retrying save".into()),
            Err(e) => self.save_failure = Some(Notice::SaveFailed(e.to_string())),
        }
    }

    pub fn dismiss_save_failure(&mut self) {
        self.save_failure = None;
    }

    /// Land due fades and pick up write failures from the writer thread
    pub fn tick(&mut self, now: Instant) {
        if self.fading.as_ref().is_some_and(|f| now >= f.deadline) {
            self.finish_fade();
        }
        if let Some(failure) = self.store.take_write_failures().pop() {
            tracing::warn!(seq = failure.seq, error = %failure.error, "save failed");
            self.save_failure = Some(Notice::SaveFailed(failure.error));
        }
    }

    // -----------------------------------------------------------------------
    // UI state
    // -----------------------------------------------------------------------

    pub fn restore_ui_state(&mut self, state: &UiState) {
        self.filter = state.filter;
        self.cursor = state.cursor;
        self.scroll_offset = state.scroll_offset;
        self.clamp_cursor();
    }

    pub fn ui_state(&self) -> UiState {
        UiState {
            filter: self.filter,
            cursor: self.cursor,
            scroll_offset: self.scroll_offset,
        }
    }
}

/// Load config and tasks from the data directory
fn load_app(data_dir: &Path) -> Result<App, Box<dyn std::error::Error>> {
    let config = read_config(data_dir)?;
    let store = TaskStore::load(FileStorage::new(data_dir))?;
    let mut app = App::new(store, config, data_dir.to_path_buf());
    if let Some(state) = read_ui_state(data_dir) {
        app.restore_ui_state(&state);
    }
    Ok(app)
}

fn save_ui_state(app: &App) {
    if let Err(e) = write_ui_state(&app.data_dir, &app.ui_state()) {
        tracing::warn!(error = %e, "could not save UI state");
    }
}

/// Run the TUI application
pub fn run(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_app(&mut terminal, data_dir);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    data_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    // Nothing but the background until everything has loaded
    terminal.draw(|frame| render::render_loading(frame, &Theme::default()))?;
    let mut app = load_app(data_dir)?;
    tracing::debug!(tasks = app.store.len(), "tui ready");

    let result = run_event_loop(terminal, &mut app);

    app.finish_fade();
    save_ui_state(&app);
    result?;
    app.store.flush()?;
    Ok(())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
