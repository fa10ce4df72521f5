//! End-to-end session scenarios against a database file.
//!
//! Each test drives `SessionController` through its public commands, reacts
//! to the returned signals the way the TUI does, and reopens the database
//! where persistence matters.

use std::path::Path;

use chrono::Utc;
use pretty_assertions::assert_eq;

use logbook::io::{EntityStore, SqliteStore};
use logbook::model::{LogFormData, ProjectFormData, ProjectStatus, TaskFormData};
use logbook::session::{
    DetailTab, DialogKey, ErrorKind, SessionController, SessionOptions, Signal, TaskDetailMode,
    ViewState,
};

type Session = SessionController<SqliteStore>;

fn open(db: &Path, options: SessionOptions) -> Session {
    SessionController::new(SqliteStore::open(db).unwrap(), options).unwrap()
}

/// Apply a signal the way the event loop does.
fn react(session: &mut Session, signal: Signal) {
    match signal {
        Signal::RefreshProjectList => {
            session.refresh_projects();
        }
        Signal::RefreshActiveProjectView => {
            session.refresh_active_project();
        }
        Signal::None | Signal::Quit | Signal::ShowError => {}
    }
}

/// Run one command and react to its signal.
fn act(session: &mut Session, command: impl FnOnce(&mut Session) -> Signal) -> Signal {
    let signal = command(session);
    react(session, signal);
    signal
}

fn project(name: &str) -> ProjectFormData {
    ProjectFormData {
        name: name.into(),
        summary: format!("{} summary", name),
        description: String::new(),
        status: ProjectStatus::Todo,
    }
}

fn task(title: &str) -> TaskFormData {
    TaskFormData {
        title: title.into(),
        description: String::new(),
    }
}

fn titles(session: &Session) -> Vec<String> {
    session
        .visual_tasks()
        .iter()
        .map(|t| t.title.clone())
        .collect()
}

#[test]
fn test_projects_tasks_and_logs_persist() {
    let tmp = tempfile::TempDir::new().unwrap();
    let db = tmp.path().join("nested").join("logbook.db");

    {
        let mut s = open(&db, SessionOptions::default());
        s.go_to_create_view();
        let sig = s.create_project(&project("Garden"));
        assert_eq!(sig, Signal::RefreshProjectList);
        react(&mut s, sig);
        assert_eq!(s.view(), ViewState::List);

        let sig = s.select_project(0);
        react(&mut s, sig);
        for title in ["Dig", "Plant", "Water"] {
            let sig = s.create_task(&task(title));
            react(&mut s, sig);
        }
        let sig = s.create_log(&LogFormData {
            title: "Day 1".into(),
            description: "Soil is wet".into(),
        });
        react(&mut s, sig);
        assert_eq!(s.logs().len(), 1);
    }

    let mut s = open(&db, SessionOptions::default());
    assert_eq!(s.projects().len(), 1);
    assert_eq!(s.projects()[0].name, "Garden");
    let sig = s.select_project(0);
    react(&mut s, sig);
    assert_eq!(titles(&s), vec!["Dig", "Plant", "Water"]);
    assert_eq!(s.logs()[0].description, "Soil is wet");
}

#[test]
fn test_completion_keeps_relative_order() {
    let tmp = tempfile::TempDir::new().unwrap();
    let db = tmp.path().join("logbook.db");
    let mut s = open(
        &db,
        SessionOptions {
            show_completed: true,
            step_back_on_complete: true,
        },
    );
    act(&mut s, |s| s.create_project(&project("Garden")));
    act(&mut s, |s| s.select_project(0));
    s.set_tab(DetailTab::Tasks);
    for title in ["A", "B", "C", "D"] {
        let sig = s.create_task(&task(title));
        react(&mut s, sig);
    }

    // Complete C then A: completed tasks keep creation order among themselves
    let c = s.tasks()[2].id;
    let a = s.tasks()[0].id;
    s.toggle_task_completion(c, Some(Utc::now()));
    s.toggle_task_completion(a, Some(Utc::now()));
    assert_eq!(titles(&s), vec!["B", "D", "A", "C"]);

    // Reopen A: it returns to its place among the pending tasks
    s.toggle_task_completion(a, None);
    assert_eq!(titles(&s), vec!["A", "B", "D", "C"]);
}

#[test]
fn test_cursor_steps_back_after_completing_with_completed_hidden() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut s = open(&tmp.path().join("logbook.db"), SessionOptions::default());
    act(&mut s, |s| s.create_project(&project("Garden")));
    act(&mut s, |s| s.select_project(0));
    s.set_tab(DetailTab::Tasks);
    for title in ["A", "B", "C"] {
        let sig = s.create_task(&task(title));
        react(&mut s, sig);
    }

    s.move_task_cursor_down();
    s.move_task_cursor_down();
    assert_eq!(s.task_cursor(), 2);
    let sig = s.toggle_task_under_cursor();
    assert_eq!(sig, Signal::RefreshActiveProjectView);
    react(&mut s, sig);
    assert_eq!(titles(&s), vec!["A", "B"]);
    assert_eq!(s.task_cursor(), 1);
    assert_eq!(s.task_under_cursor().unwrap().title, "B");
}

#[test]
fn test_cursor_stays_when_step_back_disabled() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut s = open(
        &tmp.path().join("logbook.db"),
        SessionOptions {
            show_completed: false,
            step_back_on_complete: false,
        },
    );
    act(&mut s, |s| s.create_project(&project("Garden")));
    act(&mut s, |s| s.select_project(0));
    for title in ["A", "B", "C"] {
        let sig = s.create_task(&task(title));
        react(&mut s, sig);
    }

    s.move_task_cursor_down();
    s.toggle_task_under_cursor();
    assert_eq!(titles(&s), vec!["A", "C"]);
    assert_eq!(s.task_cursor(), 1);
    assert_eq!(s.task_under_cursor().unwrap().title, "C");
}

#[test]
fn test_delete_project_through_dialog() {
    let tmp = tempfile::TempDir::new().unwrap();
    let db = tmp.path().join("logbook.db");
    let mut s = open(&db, SessionOptions::default());
    act(&mut s, |s| s.create_project(&project("Garden")));
    act(&mut s, |s| s.create_project(&project("Shed")));
    act(&mut s, |s| s.select_project(1));
    act(&mut s, |s| s.create_task(&task("Roof")));
    act(&mut s, |s| s.go_to_list_view());

    s.open_delete_project_dialog(1);
    assert_eq!(s.view(), ViewState::DeleteProjectConfirm);
    // Cancel is the default choice
    assert_eq!(s.dialog_input(DialogKey::Submit), Signal::None);
    assert_eq!(s.view(), ViewState::List);
    assert_eq!(s.projects().len(), 2);

    s.open_delete_project_dialog(1);
    s.dialog_input(DialogKey::Toggle);
    let sig = s.dialog_input(DialogKey::Submit);
    assert_eq!(sig, Signal::RefreshProjectList);
    react(&mut s, sig);
    assert_eq!(s.view(), ViewState::List);
    assert!(s.dialog().is_none());
    let names: Vec<&str> = s.projects().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Garden"]);

    // The project's tasks went with it
    let store = SqliteStore::open(&db).unwrap();
    let shed_id = 2;
    assert!(store.list_tasks_for(shed_id).unwrap().is_empty());
}

#[test]
fn test_failed_command_keeps_state_and_reports() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut s = open(&tmp.path().join("logbook.db"), SessionOptions::default());
    act(&mut s, |s| s.create_project(&project("Garden")));
    act(&mut s, |s| s.select_project(0));
    s.set_tab(DetailTab::Tasks);

    s.go_to_create_task_view();
    let sig = s.create_task(&task("   "));
    assert_eq!(sig, Signal::ShowError);
    assert_eq!(s.view(), ViewState::CreateTask);
    let err = s.last_error().unwrap();
    assert_eq!(err.kind(), ErrorKind::StoreFailure);
    assert_eq!(err.to_string(), "title is required");

    // The next successful command clears the error
    s.cancel_form();
    act(&mut s, |s| s.create_task(&task("Dig")));
    assert!(s.last_error().is_none());

    // Out of range selection
    assert_eq!(s.select_task(5), Signal::ShowError);
    assert_eq!(s.last_error().unwrap().kind(), ErrorKind::NotFound);
    assert_eq!(s.task_mode(), TaskDetailMode::None);
}

#[test]
fn test_update_task_keeps_completion() {
    let tmp = tempfile::TempDir::new().unwrap();
    let mut s = open(
        &tmp.path().join("logbook.db"),
        SessionOptions {
            show_completed: true,
            step_back_on_complete: true,
        },
    );
    act(&mut s, |s| s.create_project(&project("Garden")));
    act(&mut s, |s| s.select_project(0));
    act(&mut s, |s| s.create_task(&task("Dig")));
    let id = s.tasks()[0].id;
    s.toggle_task_completion(id, Some(Utc::now()));

    s.edit_task(0);
    assert_eq!(s.task_mode(), TaskDetailMode::Edit);
    let sig = s.update_task(
        id,
        &TaskFormData {
            title: "Dig deeper".into(),
            description: "30cm".into(),
        },
    );
    react(&mut s, sig);
    let t = &s.tasks()[0];
    assert_eq!(t.title, "Dig deeper");
    assert!(t.is_completed());
    assert_eq!(s.task_mode(), TaskDetailMode::None);
}
