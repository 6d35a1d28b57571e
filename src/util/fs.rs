//! Filesystem helpers for store file discovery.
//!
//! Provides [`find_store_files`] to search a container directory for
//! SQLite store files. Used by [`Library::discover`] and the `info`
//! subcommand.
//!
//! [`Library::discover`]: crate::books::library::Library::discover

use std::path::{Path, PathBuf};

use crate::IbkError;

/// Find store files in a container directory, filtered by extension.
///
/// The Apple Books containers are flat, so only the directory itself is
/// searched. Results are sorted by path, which puts the live store ahead
/// of its dated siblings.
pub fn find_store_files(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, IbkError> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| IbkError::Io(format!("cannot read directory {}: {}", dir.display(), e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IbkError::Io(format!("cannot read directory entry: {e}")))?;
        let path = entry.path();
        if path.is_file() && has_matching_extension(&path, extensions) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn has_matching_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .is_some_and(|ext| extensions.iter().any(|e| ext == *e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_empty_dir() {
        let dir = TempDir::new().unwrap();
        let files = find_store_files(dir.path(), &["sqlite"]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("BKLibrary-2.sqlite"), b"x").unwrap();
        fs::write(dir.path().join("BKLibrary-1.sqlite"), b"x").unwrap();
        fs::write(dir.path().join("BKLibrary-1.sqlite-wal"), b"x").unwrap();

        let files = find_store_files(dir.path(), &["sqlite"]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("BKLibrary-1.sqlite"));
    }

    #[test]
    fn test_find_skips_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested.sqlite")).unwrap();
        let files = find_store_files(dir.path(), &["sqlite"]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_nonexistent_dir() {
        let result = find_store_files(Path::new("/nonexistent/dir"), &["sqlite"]);
        assert!(result.is_err());
    }
}
