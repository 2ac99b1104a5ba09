//! `iclass`: modal terminal text editor.
//!
//! Usage: `iclass [FILE] [--log-file PATH] [--log-level LEVEL]`

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use iclass::{Args, CrosstermTerminal, Editor, EditorConfig, FsStore, RunOutcome};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = EditorConfig::from(Args::parse());
    let _log_guard = configure_logging(&config)?;

    let mut editor = Editor::new(FsStore::new(), config.capacity);
    if let Some(file) = &config.file {
        editor.open(file);
    }

    let mut term = CrosstermTerminal::new().context("failed to initialize terminal")?;
    info!(target: "runtime", file = ?config.file, "editor_start");

    let outcome = editor.run(&mut term);
    drop(term);

    match outcome.context("editor terminated")? {
        RunOutcome::Quit { forced } => info!(target: "runtime", forced, "editor_exit"),
        RunOutcome::InputClosed => info!(target: "runtime", "input_closed"),
    }
    Ok(())
}

/// Install a file logger when `--log-file` is given.
///
/// The returned guard flushes the background writer when dropped, so it
/// must live until the end of `main`.
fn configure_logging(config: &EditorConfig) -> Result<Option<WorkerGuard>> {
    let Some(log_path) = &config.log_file else {
        return Ok(None);
    };

    let dir = log_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = log_path
        .file_name()
        .with_context(|| format!("invalid log file path: {}", log_path.display()))?;

    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("invalid log level: {}", config.log_level))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install logger")?;

    Ok(Some(guard))
}
