//! StaffDesk command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the slot database.
//! - Dispatch one subcommand against the core library.

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use log::error;
use staffdesk_core::db::open_db;
use staffdesk_core::{init_logging, CoreConfig, SqliteSlotRepository};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = CoreConfig::resolve(cli.data_dir, cli.log_level);

    match run(&config, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CoreConfig, command: Command) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(&config.data_dir)?;

    // Logging is best-effort; a read-only log dir must not block commands.
    if let Err(err) = init_logging(&config.log_level, &config.log_dir().to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(config.db_path())?;
    let repo = SqliteSlotRepository::new(&conn);

    match command {
        Command::List(view) => commands::list(repo, &view),
        Command::Add(args) => commands::add(repo, args),
        Command::Edit(args) => commands::edit(repo, args),
        Command::Delete(args) => commands::delete(repo, args),
        Command::Export(args) => commands::export(repo, args),
        Command::Theme(args) => commands::theme(repo, args),
    }
}
