use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StampError {
    #[error("malformed first-seen stamp {value:?} on {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("cannot access first-seen stamp on {}: {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StampError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Malformed { path, .. } | Self::Access { path, .. } => path,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error(transparent)]
    Stamp(#[from] StampError),
    #[error("cannot stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot list directory {}: {source}", .path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Reported through the observer only; never returned by the walker.
    #[error("cannot remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SweepError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Stamp(e) => e.path(),
            Self::Stat { path, .. } | Self::ListDir { path, .. } | Self::Remove { path, .. } => path,
        }
    }
}
