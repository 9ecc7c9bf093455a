use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;
use std::path::PathBuf;

/// How an entry is removed once it expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Removed with a single unlink.
    File,
    /// Removed together with its whole subtree.
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Kept,
    Removed,
    /// Expired, but the run is simulate-only.
    WouldRemove,
    /// Expired, and the delete call failed.
    RemoveFailed,
}

impl Disposition {
    #[must_use]
    pub const fn is_expired(self) -> bool {
        !matches!(self, Self::Kept)
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kept => write!(f, "kept"),
            Self::Removed => write!(f, "removed"),
            Self::WouldRemove => write!(f, "would remove"),
            Self::RemoveFailed => write!(f, "remove failed"),
        }
    }
}

/// Result of aging a single file, or a directory given leaf treatment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub first_seen: DateTime<Utc>,
    pub age: TimeDelta,
    pub disposition: Disposition,
    /// Disk usage in bytes, measured only for expired entries.
    pub size: u64,
}

impl EntryReport {
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.disposition.is_expired()
    }
}
