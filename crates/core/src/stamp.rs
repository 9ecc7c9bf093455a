use agesweep_utils::datetime::{format_stamp, parse_stamp, stamp_now};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::debug;

use crate::{AttributeStore, StampError};

/// Reads and lazily assigns first-seen timestamps under one attribute key.
///
/// `get_or_init` is a read followed by a write; two processes racing on the
/// same unstamped entry can both write, and the later stamp wins.
#[derive(Debug)]
pub struct StampKeeper<S> {
    store: S,
    key: String,
}

impl<S: AttributeStore> StampKeeper<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self { store, key: key.into() }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Stored first-seen time, or `None` if the entry has never been stamped.
    ///
    /// # Errors
    ///
    /// - `StampError::Malformed` if a value exists but is not RFC 3339
    /// - `StampError::Access` if the store cannot be read
    pub fn read(&self, path: &Path) -> Result<Option<DateTime<Utc>>, StampError> {
        let raw = self.store.get(path, &self.key).map_err(|source| StampError::Access {
            path: path.to_path_buf(),
            source,
        })?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        parse_stamp(&raw).map(Some).map_err(|source| StampError::Malformed {
            path: path.to_path_buf(),
            value: String::from_utf8_lossy(&raw).into_owned(),
            source,
        })
    }

    /// Stores `timestamp`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StampError::Access` if the store rejects the write.
    pub fn write(&self, path: &Path, timestamp: &DateTime<Utc>) -> Result<(), StampError> {
        self.store
            .set(path, &self.key, format_stamp(timestamp).as_bytes())
            .map_err(|source| StampError::Access {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Stored first-seen time, stamping the entry with the current time first
    /// if it has none.
    ///
    /// # Errors
    ///
    /// Propagates read failures without writing, and write failures during
    /// initialization.
    pub fn get_or_init(&self, path: &Path) -> Result<DateTime<Utc>, StampError> {
        if let Some(first_seen) = self.read(path)? {
            return Ok(first_seen);
        }

        let now = stamp_now();
        self.write(path, &now)?;
        debug!("Stamped {:?} as first seen at {}", path, now);
        Ok(now)
    }
}
