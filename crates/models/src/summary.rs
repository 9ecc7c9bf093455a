use crate::{Disposition, EntryReport};

/// Counters for one run over all path arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    pub kept: usize,
    pub removed: usize,
    pub would_remove: usize,
    pub remove_failed: usize,
    /// Entries whose processing failed before a verdict was reached.
    pub errors: usize,
    pub bytes_reclaimed: u64,
    pub bytes_reclaimable: u64,
}

impl SweepSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: &EntryReport) {
        match report.disposition {
            Disposition::Kept => self.kept += 1,
            Disposition::Removed => {
                self.removed += 1;
                self.bytes_reclaimed += report.size;
            }
            Disposition::WouldRemove => {
                self.would_remove += 1;
                self.bytes_reclaimable += report.size;
            }
            Disposition::RemoveFailed => self.remove_failed += 1,
        }
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    #[must_use]
    pub const fn evaluated(&self) -> usize {
        self.kept + self.removed + self.would_remove + self.remove_failed
    }
}
