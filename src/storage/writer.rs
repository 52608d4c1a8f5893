// src/storage/writer.rs
// =============================================================================
// This module persists fetched page bodies to the local mirror tree.
//
// Responsibilities:
// - Create the destination directory (idempotent: "already exists" is fine,
//   and two workers racing to create the same directory is expected)
// - Refuse to clobber an existing file unless --overwrite was given
// - Surface everything else as a typed FileSystem error with the path
//
// Failure to write one page never affects any other page: the caller
// reports the error and moves on.
//
// Rust concepts:
// - std::fs: create_dir_all and write cover everything we need
// - Returning Result<PathBuf, CrawlError> so callers can both report the
//   final location and pattern-match the failure kind
// =============================================================================

use crate::error::CrawlError;
use crate::storage::paths::LocalPath;
use std::fs;
use std::path::PathBuf;

// Writes pages under a fixed output root.
#[derive(Debug, Clone)]
pub struct PageWriter {
    root: PathBuf,
    overwrite: bool,
}

impl PageWriter {
    pub fn new(root: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            root: root.into(),
            overwrite,
        }
    }

    // Persists one page body at root/directory/filename.
    //
    // Returns (path, replaced) on success, where `replaced` is true when
    // an existing file was clobbered because of the --overwrite flag.
    // Errors:
    // - DestinationExists if the file is already there and overwrite is off
    //   (the existing content is left untouched)
    // - FileSystem for directory-creation or write failures
    pub fn write_page(&self, local: &LocalPath, body: &str) -> Result<(PathBuf, bool), CrawlError> {
        let dir = self.root.join(&local.directory);

        // create_dir_all is idempotent, which also makes the worker race
        // ("two workers create out/a/ at once") a non-event
        fs::create_dir_all(&dir).map_err(|source| CrawlError::FileSystem {
            path: dir.clone(),
            source,
        })?;

        let destination = dir.join(&local.filename);
        let existed = destination.exists();

        if existed && !self.overwrite {
            return Err(CrawlError::DestinationExists { path: destination });
        }

        fs::write(&destination, body).map_err(|source| CrawlError::FileSystem {
            path: destination.clone(),
            source,
        })?;

        Ok((destination, existed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::paths::to_local_path;
    use tempfile::TempDir;

    #[test]
    fn test_writes_page_and_creates_directories() {
        let dir = TempDir::new().unwrap();
        let writer = PageWriter::new(dir.path(), false);

        let local = to_local_path("/docs/guide/intro");
        let (path, replaced) = writer.write_page(&local, "<html>hi</html>").unwrap();

        assert!(!replaced);
        assert_eq!(path, dir.path().join("docs/guide/intro.html"));
        assert_eq!(fs::read_to_string(path).unwrap(), "<html>hi</html>");
    }

    #[test]
    fn test_existing_file_is_preserved_without_overwrite() {
        let dir = TempDir::new().unwrap();
        let writer = PageWriter::new(dir.path(), false);
        let local = to_local_path("/a");

        writer.write_page(&local, "original").unwrap();
        let err = writer.write_page(&local, "replacement").unwrap_err();

        assert!(matches!(err, CrawlError::DestinationExists { .. }));
        let kept = fs::read_to_string(dir.path().join("a.html")).unwrap();
        assert_eq!(kept, "original");
    }

    #[test]
    fn test_overwrite_replaces_content() {
        let dir = TempDir::new().unwrap();
        let writer = PageWriter::new(dir.path(), true);
        let local = to_local_path("/a");

        writer.write_page(&local, "original").unwrap();
        let (_, replaced) = writer.write_page(&local, "replacement").unwrap();

        assert!(replaced);
        let content = fs::read_to_string(dir.path().join("a.html")).unwrap();
        assert_eq!(content, "replacement");
    }

    #[test]
    fn test_directory_creation_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let writer = PageWriter::new(dir.path(), false);

        writer.write_page(&to_local_path("/a/b/one"), "1").unwrap();
        // Same directory again; must not error
        writer.write_page(&to_local_path("/a/b/two"), "2").unwrap();
    }
}
