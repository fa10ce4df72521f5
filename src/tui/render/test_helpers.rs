use chrono::{TimeZone, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::{EntityStore, SqliteStore};
use crate::model::{Config, LogFormData, ProjectFormData, ProjectStatus, TaskFormData, TaskUpdate};
use crate::session::{SessionController, SessionOptions};
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

/// Render the whole app at the default test size.
pub fn render_app(app: &App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _area| {
        crate::tui::render::render(frame, app);
    })
}

pub fn project_form(name: &str, summary: &str) -> ProjectFormData {
    ProjectFormData {
        name: name.into(),
        summary: summary.into(),
        description: String::new(),
        status: ProjectStatus::Todo,
    }
}

/// An App on an empty in-memory database.
pub fn empty_app() -> App {
    let store = SqliteStore::open_in_memory().unwrap();
    let session = SessionController::new(store, SessionOptions::default()).unwrap();
    App::new(session, &Config::default())
}

/// An App with one project holding the given tasks (title, completed) and
/// log titles, not yet opened.
pub fn app_with_project(tasks: &[(&str, bool)], logs: &[(&str, &str)]) -> App {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut form = project_form("Garden", "Vegetable beds");
    form.description = "Raised beds along the fence.".into();
    form.status = ProjectStatus::InProgress;
    let project = store.create_project(&form).unwrap();

    let done_at = Utc.with_ymd_and_hms(2025, 5, 14, 9, 30, 0).unwrap();
    for (title, completed) in tasks {
        let task = store
            .create_task(
                project.id,
                &TaskFormData {
                    title: title.to_string(),
                    description: String::new(),
                },
            )
            .unwrap();
        if *completed {
            store
                .update_task(task.id, &TaskUpdate::with_completion(&task, Some(done_at)))
                .unwrap();
        }
    }
    for (title, body) in logs {
        store
            .create_log(
                project.id,
                &LogFormData {
                    title: title.to_string(),
                    description: body.to_string(),
                },
            )
            .unwrap();
    }

    let session = SessionController::new(store, SessionOptions::default()).unwrap();
    App::new(session, &Config::default())
}

/// Same as [`app_with_project`], with the project opened.
pub fn app_in_project(tasks: &[(&str, bool)], logs: &[(&str, &str)]) -> App {
    let mut app = app_with_project(tasks, logs);
    let signal = app.session.select_project(0);
    app.apply_signal(signal);
    app
}
