use agesweep_models::EntryReport;
use std::fmt;

use crate::SweepError;

/// Where in the walk an error surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    /// A top-level path argument failed.
    Argument,
    /// A child of a top-level directory failed.
    Directory,
    /// An expired entry could not be deleted.
    Removal,
}

impl fmt::Display for ErrorScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argument | Self::Removal => write!(f, "error"),
            Self::Directory => write!(f, "error processing directory"),
        }
    }
}

/// Receives every verdict and every reported error during a sweep.
pub trait SweepObserver {
    fn entry(&mut self, report: &EntryReport);
    fn error(&mut self, scope: ErrorScope, error: &SweepError);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SweepObserver for NullObserver {
    fn entry(&mut self, _report: &EntryReport) {}
    fn error(&mut self, _scope: ErrorScope, _error: &SweepError) {}
}

/// Keeps reports and rendered errors in order of arrival.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub entries: Vec<EntryReport>,
    pub errors: Vec<(ErrorScope, String)>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entry_for(&self, name: &str) -> Option<&EntryReport> {
        self.entries
            .iter()
            .find(|report| report.path.file_name().is_some_and(|n| n == name))
    }
}

impl SweepObserver for RecordingObserver {
    fn entry(&mut self, report: &EntryReport) {
        self.entries.push(report.clone());
    }

    fn error(&mut self, scope: ErrorScope, error: &SweepError) {
        self.errors.push((scope, error.to_string()));
    }
}
