//! Mural CLI - binary entry point.
//!
//! Startup order:
//!
//! 1. Parse arguments (`clap` handles `--help` and usage errors)
//! 2. Install tracing: `~/.mural/logs/mural.log`, or stderr if that cannot be opened
//! 3. Load configuration and build the board, replaying the journal when one is configured
//! 4. Run the shell on stdin/stdout until EOF or `quit`

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mural::{Args, Backend, Shell};
use mural_config::{MuralConfig, mural_dir};
use mural_core::GridStore;
use mural_store::{CellJournal, PersistentGrid};

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_path = mural_dir().map(|dir| dir.join("logs").join("mural.log"));

    let opened = log_path
        .as_deref()
        .map(|path| open_log_file(path).map(|file| (path, file)));

    match opened {
        Some(Ok((path, file))) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %path.display(), "Logging initialized");
        }
        failed => {
            // stdout carries command output, so diagnostics go to stderr.
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr))
                .with(env_filter)
                .init();
            if let Some(Err(err)) = failed {
                tracing::warn!("Log file unavailable, logging to stderr: {err:#}");
            }
        }
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log dir {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

fn open_backend(config: &MuralConfig, in_memory: bool) -> Result<Backend> {
    let dimensions = config.dimensions().context("invalid board configuration")?;

    let journal_path = config.journal_path().filter(|_| !in_memory);
    let Some(path) = journal_path else {
        tracing::info!(%dimensions, "Board running in memory");
        return Ok(Backend::Memory(GridStore::shared(dimensions)));
    };

    let journal = CellJournal::open(&path)?;
    let grid = PersistentGrid::open(dimensions, journal)
        .with_context(|| format!("failed to restore board from {}", path.display()))?;
    tracing::info!(%dimensions, path = %path.display(), "Board backed by journal");
    Ok(Backend::Journaled(grid))
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing();

    let config = args
        .load_config()
        .context("failed to load configuration")?;
    let backend = open_backend(&config, args.in_memory)?;
    let shell = Shell::new(backend);

    let stdin = io::stdin();
    let stdout = io::stdout();
    shell
        .run(stdin.lock(), BufWriter::new(stdout.lock()))
        .context("shell I/O failed")?;

    tracing::info!(
        painted = shell.backend().painted_count(),
        revision = shell.backend().revision(),
        "Shell exited"
    );
    Ok(())
}
