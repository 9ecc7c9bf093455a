use agesweep_core::{Sweeper, XattrStore};
use clap::Parser;
use color_eyre::eyre::Result;
use std::path::Path;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;
mod console;
use cli::Args;
use console::ConsoleObserver;

const LOG_ENV: &str = "AGESWEEP_LOG";
const FILE_FILTER: &str = "agesweep=info,warn";
// Only `error!` reaches the terminal by default; the console observer owns stderr
const STDERR_FILTER: &str = "error";

fn main() -> Result<()> {
    // Install error hooks
    color_eyre::install()?;

    // Bad arguments exit here, before any path is touched
    let args = Args::parse();
    let settings = args.settings()?;

    setup_logging(settings.log_file.as_deref())?;

    if !XattrStore::is_supported_platform() {
        error!("Extended attributes are not supported on this platform; every entry will fail");
    }

    let mut sweeper = Sweeper::from_settings(XattrStore::new(), &settings)?;
    let mut console = ConsoleObserver::stdio(settings.verbose);
    let summary = sweeper.sweep(&args.paths, &mut console);

    if settings.verbose {
        console.summary(&summary);
    }

    // Per-path failures were already reported and do not change the exit status
    Ok(())
}

fn setup_logging(log_file: Option<&Path>) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_target(true)
        .with_line_number(true)
        .with_thread_ids(false);

    if let Some(log_path) = log_file {
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new().create(true).append(true).open(log_path)?;

        builder
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(env_filter(FILE_FILTER))
            .init();
        tracing::info!("Starting agesweep, logging to {}", log_path.display());
    } else {
        builder
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter(STDERR_FILTER))
            .init();
    }

    Ok(())
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}
