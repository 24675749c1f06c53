use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use tareas::cli::commands::Cli;
use tareas::cli::handlers;
use tareas::io::config_io::resolve_data_dir;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Tracing is opt-in via RUST_LOG and goes to `tareas.log` in the data
/// directory, since stderr belongs to the terminal UI.
fn init_tracing(data_dir: &Path) {
    let Some(filter) = std::env::var("RUST_LOG").ok().and_then(|raw| {
        let raw = raw.trim();
        if raw.is_empty() || raw.len() > 4096 {
            return None;
        }
        EnvFilter::try_new(raw).ok()
    }) else {
        return;
    };

    if fs::create_dir_all(data_dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("tareas.log"))
    else {
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let data_dir = match resolve_data_dir(cli.data_dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&data_dir);

    let result = match cli.command {
        // No subcommand → launch TUI
        None => tareas::tui::run(&data_dir),
        Some(command) => handlers::dispatch(command, &data_dir, cli.json),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
