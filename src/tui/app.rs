use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::{Regex, RegexBuilder};
use tracing::info;

use crate::io::SqliteStore;
use crate::model::{Config, Project};
use crate::session::{SessionController, SessionError, SessionOptions, Signal};

use super::editor::LineInput;
use super::forms::{LogForm, ProjectForm, TaskForm};
use super::input;
use super::render;
use super::theme::Theme;

/// Main application state: the session plus everything that only exists on
/// screen (form buffers, list cursor, filter, pager scroll).
pub struct App {
    pub session: SessionController<SqliteStore>,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub should_quit: bool,
    /// Help overlay visible
    pub show_help: bool,
    /// Cursor into the filtered project list
    pub list_cursor: usize,
    /// Applied project filter
    pub filter: Option<String>,
    /// Filter being typed
    pub filter_input: Option<LineInput>,
    pub project_form: ProjectForm,
    pub task_form: TaskForm,
    /// Edit pane of the tasks tab
    pub task_edit: Option<TaskForm>,
    /// Title-only task input of the tasks tab
    pub quick_add: Option<LineInput>,
    pub log_form: LogForm,
    /// First visible row of the log pager
    pub pager_scroll: u16,
}

impl App {
    pub fn new(session: SessionController<SqliteStore>, config: &Config) -> Self {
        App {
            session,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            should_quit: false,
            show_help: false,
            list_cursor: 0,
            filter: None,
            filter_input: None,
            project_form: ProjectForm::new(),
            task_form: TaskForm::new(),
            task_edit: None,
            quick_add: None,
            log_form: LogForm::new(),
            pager_scroll: 0,
        }
    }

    /// Project list filter. Case-insensitive regex, or a literal match when
    /// the pattern does not compile.
    pub fn filter_re(&self) -> Option<Regex> {
        let pattern = match &self.filter_input {
            Some(input) => input.text(),
            None => self.filter.as_deref()?,
        };
        if pattern.is_empty() {
            return None;
        }
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .or_else(|_| {
                RegexBuilder::new(&regex::escape(pattern))
                    .case_insensitive(true)
                    .build()
            })
            .ok()
    }

    /// Projects shown in the list, with their index into the session's list
    pub fn visible_projects(&self) -> Vec<(usize, &Project)> {
        let re = self.filter_re();
        self.session
            .projects()
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                re.as_ref()
                    .is_none_or(|re| re.is_match(&p.name) || re.is_match(&p.summary))
            })
            .collect()
    }

    /// Session index of the project under the list cursor
    pub fn project_index_under_cursor(&self) -> Option<usize> {
        self.visible_projects()
            .get(self.list_cursor)
            .map(|(idx, _)| *idx)
    }

    pub fn clamp_list_cursor(&mut self) {
        let len = self.visible_projects().len();
        self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.session.last_error()
    }

    /// React to a session signal. Refreshes can themselves fail, in which
    /// case the error stays on the session for the status row.
    pub fn apply_signal(&mut self, signal: Signal) {
        match signal {
            Signal::None | Signal::ShowError => {}
            Signal::RefreshProjectList => {
                let next = self.session.refresh_projects();
                self.clamp_list_cursor();
                self.apply_signal(next);
            }
            Signal::RefreshActiveProjectView => {
                let next = self.session.refresh_active_project();
                self.task_edit = None;
                self.apply_signal(next);
            }
            Signal::Quit => self.should_quit = true,
        }
    }
}

/// Run the TUI against the database at `db_path`
pub fn run(db_path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open(db_path)?;
    let session = SessionController::new(store, SessionOptions::from(&config.tasks))?;
    let mut app = App::new(session, config);
    info!(db = %db_path.display(), "starting tui");

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

    info!("tui closed");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::EntityStore;
    use crate::model::{ProjectFormData, ProjectStatus};

    fn app_with(names: &[&str]) -> App {
        let mut store = SqliteStore::open_in_memory().unwrap();
        for name in names {
            store
                .create_project(&ProjectFormData {
                    name: name.to_string(),
                    summary: format!("{} summary", name),
                    description: String::new(),
                    status: ProjectStatus::Todo,
                })
                .unwrap();
        }
        let session = SessionController::new(store, SessionOptions::default()).unwrap();
        App::new(session, &Config::default())
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut app = app_with(&["Garden", "Kitchen", "garage door"]);
        app.filter = Some("GAR".into());
        let names: Vec<&str> = app
            .visible_projects()
            .iter()
            .map(|(_, p)| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Garden", "garage door"]);
    }

    #[test]
    fn test_invalid_regex_falls_back_to_literal() {
        let mut app = app_with(&["a(b", "ab"]);
        app.filter = Some("a(".into());
        let visible = app.visible_projects();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].1.name, "a(b");
    }

    #[test]
    fn test_cursor_maps_through_filter() {
        let mut app = app_with(&["one", "two", "three"]);
        app.filter = Some("^t".into());
        app.list_cursor = 1;
        assert_eq!(app.project_index_under_cursor(), Some(2));
    }

    #[test]
    fn test_quit_signal_sets_flag() {
        let mut app = app_with(&[]);
        app.apply_signal(Signal::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_refresh_project_list_clamps_cursor() {
        let mut app = app_with(&["one", "two"]);
        app.list_cursor = 1;
        let signal = app.session.delete_project(1);
        app.apply_signal(signal);
        assert_eq!(app.session.projects().len(), 1);
        assert_eq!(app.list_cursor, 0);
    }
}
