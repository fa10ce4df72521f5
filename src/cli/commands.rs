use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::ProjectStatus;

#[derive(Parser)]
#[command(name = "lb", about = concat!("logbook v", env!("CARGO_PKG_VERSION"), " - projects, tasks and logs in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a project
    CreateProject(CreateProjectArgs),
    /// Add a task to a project
    CreateTask(CreateTaskArgs),
    /// Add a log entry to a project
    CreateLog(CreateLogArgs),
    /// List every project with its tasks and logs
    ListProjects,
}

#[derive(Args)]
pub struct CreateProjectArgs {
    /// Project name
    #[arg(long)]
    pub name: String,
    /// One-line summary
    #[arg(long, default_value = "")]
    pub summary: String,
    /// Longer description (markdown)
    #[arg(long, default_value = "")]
    pub desc: String,
    /// Initial status: todo, in-progress, completed, archived
    #[arg(long, default_value = "todo")]
    pub status: ProjectStatus,
}

#[derive(Args)]
pub struct CreateTaskArgs {
    /// Project ID
    #[arg(long)]
    pub project: i64,
    /// Task title
    #[arg(long)]
    pub title: String,
    /// Task description
    #[arg(long, default_value = "")]
    pub desc: String,
}

#[derive(Args)]
pub struct CreateLogArgs {
    /// Project ID
    #[arg(long)]
    pub project: i64,
    /// Log title (may be empty)
    #[arg(long, default_value = "")]
    pub title: String,
    /// Log body (markdown)
    #[arg(long, default_value = "")]
    pub desc: String,
}
