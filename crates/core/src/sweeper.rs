use agesweep_config::{DEFAULT_ATTRIBUTE_KEY, DEFAULT_RETENTION_DAYS, Settings};
use agesweep_models::{Disposition, EntryKind, EntryReport, SweepSummary};
use agesweep_utils::datetime::format_age;
use agesweep_utils::disk_usage;
use chrono::{TimeDelta, Utc};
use color_eyre::eyre::Result;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::{AttributeStore, ErrorScope, StampKeeper, SweepError, SweepObserver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepOptions {
    /// Entries strictly older than this are removed.
    pub retention: TimeDelta,
    /// Report expired entries without deleting them.
    pub dry_run: bool,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            retention: TimeDelta::days(i64::from(DEFAULT_RETENTION_DAYS)),
            dry_run: false,
        }
    }
}

impl SweepOptions {
    /// # Errors
    ///
    /// Returns an error if the configured retention is out of range.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            retention: settings.retention()?,
            dry_run: settings.dry_run,
        })
    }
}

/// Ages and removes entries beneath top-level path arguments.
///
/// A top-level directory is listed once. Each child is aged on its own: files
/// individually, subdirectories as a single unit whose contents are never
/// inspected.
#[derive(Debug)]
pub struct Sweeper<S> {
    stamps: StampKeeper<S>,
    options: SweepOptions,
    summary: SweepSummary,
}

impl<S: AttributeStore> Sweeper<S> {
    pub fn new(store: S, options: SweepOptions) -> Self {
        Self::with_key(store, DEFAULT_ATTRIBUTE_KEY, options)
    }

    pub fn with_key(store: S, key: impl Into<String>, options: SweepOptions) -> Self {
        Self {
            stamps: StampKeeper::new(store, key),
            options,
            summary: SweepSummary::new(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if the configured retention is out of range.
    pub fn from_settings(store: S, settings: &Settings) -> Result<Self> {
        let options = SweepOptions::from_settings(settings)?;
        Ok(Self::with_key(store, settings.attribute_key.clone(), options))
    }

    #[must_use]
    pub const fn stamps(&self) -> &StampKeeper<S> {
        &self.stamps
    }

    #[must_use]
    pub const fn options(&self) -> &SweepOptions {
        &self.options
    }

    #[must_use]
    pub const fn summary(&self) -> &SweepSummary {
        &self.summary
    }

    /// Processes each path argument independently. A failing argument is
    /// reported and the next one still runs.
    pub fn sweep<P: AsRef<Path>>(&mut self, paths: &[P], observer: &mut dyn SweepObserver) -> SweepSummary {
        info!(
            "Sweeping {} path(s), retention {}, dry run: {}",
            paths.len(),
            format_age(self.options.retention),
            self.options.dry_run
        );

        for path in paths {
            let path = path.as_ref();
            let errors_before = self.summary.errors;
            if let Err(e) = self.process(path, 0, observer) {
                warn!("Failed to process {:?}: {}", path, e);
                observer.error(ErrorScope::Argument, &e);
                // A child failure resurfacing here was already counted.
                if self.summary.errors == errors_before {
                    self.summary.record_error();
                }
            }
        }

        info!(
            "Sweep finished: {} kept, {} removed, {} would remove, {} failed, {} errors",
            self.summary.kept,
            self.summary.removed,
            self.summary.would_remove,
            self.summary.remove_failed,
            self.summary.errors
        );
        self.summary.clone()
    }

    /// Processes one entry found at `depth` (0 for a path argument).
    ///
    /// # Errors
    ///
    /// Returns the stat, listing or stamp failure for this entry. For a
    /// top-level directory, returns the last failure among its children after
    /// all of them have been processed.
    pub fn process(&mut self, path: &Path, depth: usize, observer: &mut dyn SweepObserver) -> Result<(), SweepError> {
        let metadata = fs::metadata(path).map_err(|source| SweepError::Stat {
            path: path.to_path_buf(),
            source,
        })?;

        if metadata.is_dir() {
            self.process_dir(path, depth, observer)
        } else {
            self.evaluate(path, EntryKind::File, observer).map(drop)
        }
    }

    fn process_dir(&mut self, path: &Path, depth: usize, observer: &mut dyn SweepObserver) -> Result<(), SweepError> {
        if depth > 0 {
            return self.evaluate(path, EntryKind::Directory, observer).map(drop);
        }

        let children = list_children(path).map_err(|source| SweepError::ListDir {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Listed {} entries in {:?}", children.len(), path);

        let mut last_error = None;
        for child in children {
            if let Err(e) = self.process(&child, depth + 1, observer) {
                warn!("Failed to process {:?}: {}", child, e);
                observer.error(ErrorScope::Directory, &e);
                self.summary.record_error();
                last_error = Some(e);
            }
        }

        last_error.map_or(Ok(()), Err)
    }

    /// Ages a single entry and removes it if it is older than the retention.
    ///
    /// # Errors
    ///
    /// Returns the stamp failure; the entry is then left untouched. A failed
    /// delete is reported to the observer and yields `RemoveFailed` instead.
    pub fn evaluate(
        &mut self,
        path: &Path,
        kind: EntryKind,
        observer: &mut dyn SweepObserver,
    ) -> Result<EntryReport, SweepError> {
        let first_seen = self.stamps.get_or_init(path)?;
        let age = Utc::now() - first_seen;

        let (disposition, size) = if age > self.options.retention {
            let size = disk_usage(path);
            if self.options.dry_run {
                (Disposition::WouldRemove, size)
            } else {
                match remove_entry(path, kind) {
                    Ok(()) => {
                        info!("Removed {} {:?} ({} old)", kind, path, format_age(age));
                        (Disposition::Removed, size)
                    }
                    Err(source) => {
                        let e = SweepError::Remove {
                            path: path.to_path_buf(),
                            source,
                        };
                        warn!("{}", e);
                        observer.error(ErrorScope::Removal, &e);
                        (Disposition::RemoveFailed, size)
                    }
                }
            }
        } else {
            (Disposition::Kept, 0)
        };

        let report = EntryReport {
            path: path.to_path_buf(),
            kind,
            first_seen,
            age,
            disposition,
            size,
        };
        debug!("{} {:?}: first seen {}, {} old", disposition, path, first_seen, format_age(age));
        self.summary.record(&report);
        observer.entry(&report);
        Ok(report)
    }
}

fn list_children(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut children = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    children.sort();
    Ok(children)
}

fn remove_entry(path: &Path, kind: EntryKind) -> io::Result<()> {
    match kind {
        EntryKind::File => fs::remove_file(path),
        EntryKind::Directory => fs::remove_dir_all(path),
    }
}
