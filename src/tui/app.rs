use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::state::{Session, SessionError};
use crate::model::{AppConfig, Priority, TodoItem, TodoList};
use crate::ops::outline::Outline;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Nobody is signed in; the name entry replaces the outline
    SignIn,
    Navigate,
    /// Editing the title of `edit_target`
    Edit,
    /// Editing the active list's name
    Rename,
    /// Item action menu for `edit_target`
    Menu,
    /// One-line entry for a schedule field of `edit_target`
    Prompt(PromptKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    DueDate,
    DueTime,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::DueDate => "Due date",
            PromptKind::DueTime => "Due time",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            PromptKind::DueDate => "YYYY-MM-DD, today, tomorrow, +N  (empty clears)",
            PromptKind::DueTime => "HH:MM  (empty clears)",
        }
    }
}

/// Entries of the item action menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    DueDate,
    DueTime,
    Priority(Option<Priority>),
    ClearSchedule,
    Duplicate,
    Delete,
}

impl MenuAction {
    pub const ALL: [MenuAction; 9] = [
        MenuAction::DueDate,
        MenuAction::DueTime,
        MenuAction::Priority(Some(Priority::High)),
        MenuAction::Priority(Some(Priority::Medium)),
        MenuAction::Priority(Some(Priority::Low)),
        MenuAction::Priority(None),
        MenuAction::ClearSchedule,
        MenuAction::Duplicate,
        MenuAction::Delete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::DueDate => "Set due date",
            MenuAction::DueTime => "Set due time",
            MenuAction::Priority(Some(Priority::High)) => "Priority: high",
            MenuAction::Priority(Some(Priority::Medium)) => "Priority: medium",
            MenuAction::Priority(Some(Priority::Low)) => "Priority: low",
            MenuAction::Priority(None) => "Priority: none",
            MenuAction::ClearSchedule => "Clear schedule",
            MenuAction::Duplicate => "Duplicate",
            MenuAction::Delete => "Delete",
        }
    }
}

/// Main application state
pub struct App {
    pub session: Session,
    pub config: AppConfig,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the active list's items
    pub cursor: usize,
    /// Scroll offset (first visible row) of the outline
    pub scroll_offset: usize,
    /// Text being typed in Edit, Rename, Prompt and SignIn modes
    pub edit_buffer: String,
    /// Byte offset of the caret in `edit_buffer`
    pub edit_cursor: usize,
    /// Item the edit, menu or prompt applies to
    pub edit_target: Option<String>,
    pub menu_cursor: usize,
    /// One-shot message for the status row; cleared on the next key
    pub status_message: Option<String>,
    /// Reference date for overdue highlighting and relative dates
    pub today: NaiveDate,
    /// Item ids of the outline as last rendered, for the focus policy
    rendered_ids: Vec<String>,
}

impl App {
    pub fn new(session: Session, config: AppConfig) -> Self {
        let theme = Theme::for_mode(session.prefs().dark_mode, &config.ui.colors);
        let mode = if session.is_signed_in() {
            Mode::Navigate
        } else {
            Mode::SignIn
        };
        let mut app = App {
            session,
            config,
            theme,
            mode,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            edit_buffer: String::new(),
            edit_cursor: 0,
            edit_target: None,
            menu_cursor: 0,
            status_message: None,
            today: Local::now().date_naive(),
            rendered_ids: Vec::new(),
        };
        app.sync_focus();
        app
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn outline(&self) -> &Outline {
        self.session.outline()
    }

    pub fn active_list(&self) -> Option<&TodoList> {
        self.session.outline().active_list()
    }

    /// Items of the active list (empty when no list is active)
    pub fn items(&self) -> &[TodoItem] {
        match self.active_list() {
            Some(list) => &list.items,
            None => &[],
        }
    }

    pub fn cursor_item(&self) -> Option<&TodoItem> {
        self.items().get(self.cursor)
    }

    pub fn cursor_item_id(&self) -> Option<String> {
        self.cursor_item().map(|item| item.id.clone())
    }

    pub fn item(&self, item_id: &str) -> Option<&TodoItem> {
        self.items().iter().find(|item| item.id == item_id)
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Run an outline operation through the session. Failures are reported in
    /// the status row; a signed-out session drops back to the sign-in screen.
    pub fn apply<R>(&mut self, op: impl FnOnce(&mut Outline) -> R) -> Option<R> {
        match self.session.apply(op) {
            Ok(result) => Some(result),
            Err(SessionError::SignedOut) => {
                self.enter_sign_in();
                None
            }
            Err(e) => {
                warn!("event=tui_apply status=error error={}", e);
                self.status_message = Some(format!("error: {}", e));
                None
            }
        }
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.items().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn move_cursor_to(&mut self, item_id: &str) {
        if let Some(idx) = self.items().iter().position(|item| item.id == item_id) {
            self.cursor = idx;
        }
    }

    /// Diff the outline against what was last rendered. The first newly
    /// rendered item with an empty title takes the cursor and enters Edit.
    pub fn sync_focus(&mut self) {
        if self.mode == Mode::SignIn {
            self.rendered_ids.clear();
            return;
        }
        let target = if matches!(self.mode, Mode::Navigate | Mode::Edit) {
            self.items()
                .iter()
                .position(|item| item.wants_focus() && !self.rendered_ids.contains(&item.id))
        } else {
            None
        };
        self.rendered_ids = self.items().iter().map(|item| item.id.clone()).collect();
        self.clamp_cursor();
        if let Some(idx) = target {
            self.cursor = idx;
            self.begin_edit();
        }
    }

    /// Start typing into `edit_buffer` in `mode`, seeded with `initial`.
    pub fn start_input(&mut self, mode: Mode, initial: &str) {
        self.edit_buffer = initial.to_string();
        self.edit_cursor = self.edit_buffer.len();
        self.mode = mode;
    }

    /// Edit the title of the item under the cursor
    pub fn begin_edit(&mut self) {
        let Some((id, title)) = self
            .cursor_item()
            .map(|item| (item.id.clone(), item.title.clone()))
        else {
            return;
        };
        self.edit_target = Some(id);
        self.start_input(Mode::Edit, &title);
    }

    /// Leave any text-entry or menu mode and return to Navigate
    pub fn end_edit(&mut self) {
        self.edit_target = None;
        self.edit_buffer.clear();
        self.edit_cursor = 0;
        self.mode = Mode::Navigate;
    }

    pub fn enter_sign_in(&mut self) {
        self.end_edit();
        self.mode = Mode::SignIn;
        self.rendered_ids.clear();
        self.status_message = Some("sign in to continue".into());
    }

    pub fn refresh_theme(&mut self) {
        self.theme = Theme::for_mode(self.session.prefs().dark_mode, &self.config.ui.colors);
    }

    pub fn toggle_theme(&mut self) {
        match self.session.toggle_dark_mode() {
            Ok(_) => self.refresh_theme(),
            Err(e) => self.status_message = Some(format!("error: {}", e)),
        }
    }

    pub fn toggle_sidebar(&mut self) {
        if let Err(e) = self.session.toggle_sidebar() {
            self.status_message = Some(format!("error: {}", e));
        }
    }

    /// Select the list at `index` in the list picker
    pub fn select_list_at(&mut self, index: usize) {
        let Some(id) = self.outline().lists().get(index).map(|l| l.id.clone()) else {
            return;
        };
        self.apply(|o| o.select_list(&id));
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    /// Step through the list picker, wrapping at both ends
    pub fn select_relative_list(&mut self, delta: isize) {
        let lists = self.outline().lists();
        if lists.is_empty() {
            self.status_message = Some("no lists yet (press n to create one)".into());
            return;
        }
        let len = lists.len() as isize;
        let next = match self.outline().active_list_id() {
            Some(active) => match lists.iter().position(|l| l.id == active) {
                Some(idx) => (idx as isize + delta).rem_euclid(len),
                None => 0,
            },
            None => 0,
        };
        self.select_list_at(next as usize);
    }
}

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

/// Run the TUI on `data_dir`. The data-directory lock is held until exit.
pub fn run(data_dir: &Path, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (session, _lock) = Session::open_dir_locked(data_dir, &config)?;
    let mut app = App::new(session, config);
    info!("event=tui_start signed_in={}", app.session.is_signed_in());

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

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("event=tui_exit");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.today = Local::now().date_naive();
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
