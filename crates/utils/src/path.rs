use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

/// Total length of the regular files at or below `path`.
///
/// Symbolic links are not followed, including `path` itself: a link counts
/// as zero bytes, since removing it frees nothing from its target. Entries that cannot be
/// read are skipped, so the result is a lower bound when access is partial.
#[must_use]
pub fn disk_usage(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .follow_root_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping unreadable entry while measuring {:?}: {}", path, e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}
