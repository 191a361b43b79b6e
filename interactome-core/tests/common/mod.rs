//! Helpers shared by the integration tests.

use std::path::PathBuf;

use tempfile::TempDir;

/// Writes `contents` to `name` inside a fresh temporary directory.
///
/// The directory lives as long as the returned guard.
pub fn write_source(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir must be creatable");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("temp file must be writable");
    (dir, path)
}
