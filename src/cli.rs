use agesweep_config::Settings;
use clap::Parser;
use color_eyre::eyre::Result;
use std::path::PathBuf;

/// Delete files and directories that were first seen longer ago than a
/// retention period. First-seen times are kept in an extended attribute on
/// each entry.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Days to keep entries after they were first seen [default: 14]
    #[arg(short, long, value_name = "N")]
    pub days: Option<u32>,

    /// Print a line for every entry kept or removed
    #[arg(short, long)]
    pub verbose: bool,

    /// Report what would be removed without deleting anything
    #[arg(short = 'n', long = "dry-run", visible_alias = "dryrun")]
    pub dry_run: bool,

    /// Config file (defaults to <config dir>/agesweep/config.toml if it exists)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Append diagnostics to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Directories to sweep, or single files to age
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

impl Args {
    /// Settings from the config file with command-line values layered on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the merged
    /// settings are invalid.
    pub fn settings(&self) -> Result<Settings> {
        let base = match &self.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::load()?,
        };
        let settings = self.apply(base);
        settings.validate()?;
        Ok(settings)
    }

    #[must_use]
    pub fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(days) = self.days {
            settings.days = days;
        }
        settings.verbose |= self.verbose;
        settings.dry_run |= self.dry_run;
        if let Some(log_file) = &self.log_file {
            settings.log_file = Some(log_file.clone());
        }
        settings
    }
}
