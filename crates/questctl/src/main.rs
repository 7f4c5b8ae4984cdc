//! questctl - RLHF Quest command-line client
//!
//! With no subcommand the interactive checklist starts.

use anyhow::Result;
use clap::Parser;
use questctl::cli::{Cli, Commands};
use questctl::commands::{self, toggle::ToggleAction};
use questctl::logging::{self, LogTarget};
use questctl::session::{self, Session};
use questctl::tui;

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let command = cli.command.take().unwrap_or(Commands::Tui);

    let mut loaded = session::load_config(cli.config.as_deref())?;

    // The TUI owns the screen, so its logs go to a file; ephemeral TUI
    // sessions must not touch the disk at all.
    let log_target = match command {
        Commands::Tui if cli.ephemeral => None,
        Commands::Tui => Some(LogTarget::tui_file(&session::resolve_data_dir(
            cli.data_dir.as_deref(),
            &loaded.config,
        ))),
        _ => Some(LogTarget::Stderr),
    };
    if let Some(target) = log_target {
        if let Err(e) = logging::init(cli.verbose, target) {
            eprintln!("warning: {:#}", e);
        }
    }

    if let Commands::Config { set } = &command {
        return commands::config::run(&mut loaded, cli.data_dir.as_deref(), set.as_deref());
    }

    let mut session = Session::open(&cli, &loaded.config);

    match command {
        Commands::Status { json } => commands::status::run(&session, json),
        Commands::Show { key, json } => commands::show::run(&session, &key, json),
        Commands::Toggle { key } => commands::toggle::run(&mut session, &key, ToggleAction::Toggle),
        Commands::Complete { key } => {
            commands::toggle::run(&mut session, &key, ToggleAction::Complete)
        }
        Commands::Reset { key } => commands::toggle::run(&mut session, &key, ToggleAction::Reset),
        Commands::Tui => {
            let result = tui::run(&mut session.controller, session.style.emojis);
            if let Some(warning) = session.controller.persist_warning() {
                eprintln!("warning: {}", warning);
            }
            result
        }
        // Handled before the session is opened
        Commands::Config { .. } => Ok(()),
    }
}
