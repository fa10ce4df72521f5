use std::error::Error;
use std::path::Path;

use tracing::{debug, info};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{EntityStore, SqliteStore};
use crate::model::{LogFormData, ProjectFormData, TaskFormData};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Open the database at `db_path`, run one subcommand and print its output.
pub fn dispatch(command: Commands, json: bool, db_path: &Path) -> Result<(), Box<dyn Error>> {
    let mut store = SqliteStore::open(db_path)?;
    let output = run_command(command, json, &mut store)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Run one subcommand against `store` and return what it would print.
pub fn run_command<S: EntityStore>(
    command: Commands,
    json: bool,
    store: &mut S,
) -> Result<String, Box<dyn Error>> {
    match command {
        Commands::CreateProject(args) => cmd_create_project(args, json, store),
        Commands::CreateTask(args) => cmd_create_task(args, json, store),
        Commands::CreateLog(args) => cmd_create_log(args, json, store),
        Commands::ListProjects => cmd_list_projects(json, store),
    }
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_create_project<S: EntityStore>(
    args: CreateProjectArgs,
    json: bool,
    store: &mut S,
) -> Result<String, Box<dyn Error>> {
    let form = ProjectFormData {
        name: args.name,
        summary: args.summary,
        description: args.desc,
        status: args.status,
    };
    let project = store.create_project(&form)?;
    info!(id = project.id, "created project from cli");
    created("project", project.id, &project.name, json)
}

fn cmd_create_task<S: EntityStore>(
    args: CreateTaskArgs,
    json: bool,
    store: &mut S,
) -> Result<String, Box<dyn Error>> {
    let form = TaskFormData {
        title: args.title,
        description: args.desc,
    };
    let task = store.create_task(args.project, &form)?;
    info!(id = task.id, project = args.project, "created task from cli");
    created("task", task.id, &task.title, json)
}

fn cmd_create_log<S: EntityStore>(
    args: CreateLogArgs,
    json: bool,
    store: &mut S,
) -> Result<String, Box<dyn Error>> {
    let form = LogFormData {
        title: args.title,
        description: args.desc,
    };
    let log = store.create_log(args.project, &form)?;
    info!(id = log.id, project = args.project, "created log from cli");
    created("log", log.id, &log.display_title(), json)
}

fn created(kind: &'static str, id: i64, name: &str, json: bool) -> Result<String, Box<dyn Error>> {
    if json {
        Ok(serde_json::to_string_pretty(&CreatedJson { kind, id })?)
    } else {
        Ok(format!("Created {} {}: {}", kind, id, name))
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list_projects<S: EntityStore>(json: bool, store: &S) -> Result<String, Box<dyn Error>> {
    let projects = store.list_projects()?;
    debug!(count = projects.len(), "listing projects");

    if json {
        let mut results = Vec::with_capacity(projects.len());
        for project in &projects {
            let tasks = store.list_tasks_for(project.id)?;
            let logs = store.list_logs_for(project.id)?;
            results.push(project_to_json(project, &tasks, &logs));
        }
        return Ok(serde_json::to_string_pretty(&results)?);
    }

    if projects.is_empty() {
        return Ok("No projects yet.".to_string());
    }
    let mut blocks = Vec::with_capacity(projects.len());
    for project in &projects {
        let tasks = store.list_tasks_for(project.id)?;
        let logs = store.list_logs_for(project.id)?;
        blocks.push(format_project_listing(project, &tasks, &logs).join("\n"));
    }
    Ok(blocks.join("\n\n"))
}
