use clap::Parser;
use logbook::cli::commands::Cli;
use logbook::cli::handlers;
use logbook::io::{config_io, logging};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config_io::config_path);
    let config = config_io::read_config_from(&config_path)?;
    // An unwritable log file is not fatal
    if let Err(e) = logging::init_logging(&config.log, &config_io::default_log_path()) {
        eprintln!("warning: logging disabled: {}", e);
    }

    let db_path = config_io::resolve_db_path(cli.db.as_deref(), &config);

    match cli.command {
        // No subcommand → launch TUI
        None => logbook::tui::run(&db_path, &config),
        Some(command) => handlers::dispatch(command, cli.json, &db_path),
    }
}
