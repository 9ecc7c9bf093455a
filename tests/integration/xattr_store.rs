#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
use chrono::{TimeDelta, Utc};
use color_eyre::Result;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use agesweep_core::{AttributeStore, StampError, StampKeeper, SweepOptions, Sweeper, RecordingObserver, XattrStore};
use agesweep_utils::datetime::format_stamp;

const KEY: &str = "user.agesweep.test";

/// tmpfs and some container filesystems reject user attributes
fn xattrs_supported(dir: &Path) -> bool {
    let probe = dir.join(".probe");
    if fs::write(&probe, b"").is_err() {
        return false;
    }
    let supported = XattrStore::is_supported_platform() && XattrStore.set(&probe, KEY, b"1").is_ok();
    let _ = fs::remove_file(&probe);
    if !supported {
        eprintln!("skipping: user extended attributes unsupported under {}", dir.display());
    }
    supported
}

#[test]
fn test_absent_attribute_reads_as_none() -> Result<()> {
    let temp_dir = TempDir::new()?;
    if !xattrs_supported(temp_dir.path()) {
        return Ok(());
    }
    let file = temp_dir.path().join("plain.txt");
    fs::write(&file, b"data")?;

    assert_eq!(XattrStore.get(&file, KEY)?, None);
    Ok(())
}

#[test]
fn test_stamp_is_persisted_on_the_entry() -> Result<()> {
    let temp_dir = TempDir::new()?;
    if !xattrs_supported(temp_dir.path()) {
        return Ok(());
    }
    let file = temp_dir.path().join("plain.txt");
    fs::write(&file, b"data")?;
    let keeper = StampKeeper::new(XattrStore::new(), KEY);

    let first_seen = keeper.get_or_init(&file)?;

    let raw = XattrStore.get(&file, KEY)?.expect("attribute written");
    assert_eq!(raw, format_stamp(&first_seen).into_bytes());
    assert_eq!(fs::read(&file)?, b"data", "content is untouched");
    assert_eq!(keeper.get_or_init(&file)?, first_seen);
    Ok(())
}

#[test]
fn test_nul_padded_value_parses() -> Result<()> {
    let temp_dir = TempDir::new()?;
    if !xattrs_supported(temp_dir.path()) {
        return Ok(());
    }
    let file = temp_dir.path().join("padded.txt");
    fs::write(&file, b"")?;
    XattrStore.set(&file, KEY, b"2024-05-01T00:00:00Z\n\0")?;

    let keeper = StampKeeper::new(XattrStore::new(), KEY);
    let stamp = keeper.read(&file)?.expect("stamp present");
    assert_eq!(format_stamp(&stamp), "2024-05-01T00:00:00Z");
    Ok(())
}

#[test]
fn test_missing_entry_is_an_access_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let keeper = StampKeeper::new(XattrStore::new(), KEY);

    match keeper.read(&temp_dir.path().join("missing")) {
        Err(StampError::Access { .. }) => Ok(()),
        other => panic!("expected access error, got {other:?}"),
    }
}

#[test]
fn test_sweep_with_real_attributes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    if !xattrs_supported(temp_dir.path()) {
        return Ok(());
    }
    let root = temp_dir.path().join("cache");
    let old = root.join("old");
    fs::create_dir_all(&old)?;
    fs::write(old.join("inside.txt"), b"x")?;
    fs::write(root.join("a.txt"), b"x")?;
    let thirty_days_ago = Utc::now() - TimeDelta::days(30);
    XattrStore.set(&old, KEY, format_stamp(&thirty_days_ago).as_bytes())?;

    let options = SweepOptions {
        retention: TimeDelta::days(14),
        dry_run: false,
    };
    let mut sweeper = Sweeper::with_key(XattrStore::new(), KEY, options);
    let summary = sweeper.sweep(&[&root], &mut RecordingObserver::new());

    assert_eq!(summary.removed, 1);
    assert_eq!(summary.kept, 1);
    assert!(!old.exists());
    assert!(XattrStore.get(&root.join("a.txt"), KEY)?.is_some());
    Ok(())
}
