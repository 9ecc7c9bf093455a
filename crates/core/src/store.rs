use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Per-entry key/value storage kept out of band from file content.
pub trait AttributeStore {
    /// Returns `Ok(None)` when the entry exists but carries no value for `key`.
    ///
    /// # Errors
    ///
    /// Any failure other than "attribute absent".
    fn get(&self, path: &Path, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// # Errors
    ///
    /// Any failure storing the value.
    fn set(&self, path: &Path, key: &str, value: &[u8]) -> io::Result<()>;
}

impl<S: AttributeStore + ?Sized> AttributeStore for &S {
    fn get(&self, path: &Path, key: &str) -> io::Result<Option<Vec<u8>>> {
        (**self).get(path, key)
    }

    fn set(&self, path: &Path, key: &str, value: &[u8]) -> io::Result<()> {
        (**self).set(path, key, value)
    }
}

/// Extended file attributes. Symbolic links are followed, like `stat`.
#[derive(Debug, Default, Clone, Copy)]
pub struct XattrStore;

impl XattrStore {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub const fn is_supported_platform() -> bool {
        xattr::SUPPORTED_PLATFORM
    }
}

impl AttributeStore for XattrStore {
    fn get(&self, path: &Path, key: &str) -> io::Result<Option<Vec<u8>>> {
        xattr::get_deref(path, key)
    }

    fn set(&self, path: &Path, key: &str, value: &[u8]) -> io::Result<()> {
        xattr::set_deref(path, key, value)
    }
}

/// In-process store for tests and benchmarks.
///
/// Like a real attribute store, it refuses paths that do not exist.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<(PathBuf, String), Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored value, bypassing the existence check.
    #[must_use]
    pub fn raw(&self, path: &Path, key: &str) -> Option<Vec<u8>> {
        self.values.borrow().get(&(path.to_path_buf(), key.to_string())).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl AttributeStore for MemoryStore {
    fn get(&self, path: &Path, key: &str) -> io::Result<Option<Vec<u8>>> {
        fs::metadata(path)?;
        Ok(self.raw(path, key))
    }

    fn set(&self, path: &Path, key: &str, value: &[u8]) -> io::Result<()> {
        fs::metadata(path)?;
        self.values
            .borrow_mut()
            .insert((path.to_path_buf(), key.to_string()), value.to_vec());
        Ok(())
    }
}
