mod entry;
mod summary;

pub use entry::{Disposition, EntryKind, EntryReport};
pub use summary::SweepSummary;
