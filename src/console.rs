use agesweep_core::{ErrorScope, SweepError, SweepObserver};
use agesweep_models::{EntryReport, SweepSummary};
use agesweep_utils::datetime::format_age;
use agesweep_utils::format_bytes;
use std::io::{self, Write};
use tracing::debug;

/// Verbose verdict lines on one stream, errors on another.
pub struct ConsoleObserver<O, E> {
    verbose: bool,
    out: O,
    err: E,
}

impl ConsoleObserver<io::Stdout, io::Stderr> {
    pub fn stdio(verbose: bool) -> Self {
        Self::new(verbose, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleObserver<O, E> {
    pub const fn new(verbose: bool, out: O, err: E) -> Self {
        Self { verbose, out, err }
    }

    pub fn summary(&mut self, summary: &SweepSummary) {
        let line = format_summary(summary);
        if let Err(e) = writeln!(self.out, "{line}") {
            debug!("Failed to write summary: {}", e);
        }
    }

    #[cfg(test)]
    fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> SweepObserver for ConsoleObserver<O, E> {
    fn entry(&mut self, report: &EntryReport) {
        if !self.verbose {
            return;
        }
        let verb = if report.is_expired() { "  rm" } else { "keep" };
        if let Err(e) = writeln!(
            self.out,
            "{verb} {}: {} old",
            report.path.display(),
            format_age(report.age)
        ) {
            debug!("Failed to write report for {:?}: {}", report.path, e);
        }
    }

    fn error(&mut self, scope: ErrorScope, error: &SweepError) {
        if let Err(e) = writeln!(self.err, "{scope}: {error}") {
            debug!("Failed to write error report: {}", e);
        }
    }
}

pub fn format_summary(summary: &SweepSummary) -> String {
    format!(
        "kept {}, removed {} ({}), would remove {} ({}), failed {}, errors {}",
        summary.kept,
        summary.removed,
        format_bytes(summary.bytes_reclaimed),
        summary.would_remove,
        format_bytes(summary.bytes_reclaimable),
        summary.remove_failed,
        summary.errors
    )
}
