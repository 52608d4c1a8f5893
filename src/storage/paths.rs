// src/storage/paths.rs
// =============================================================================
// This module maps a URL path onto a local (directory, filename) pair.
//
// The layout mirrors the URL structure, the way wget-style mirrors do:
//   "/"          -> (<root>,      "index.html")
//   "/a"         -> (<root>,      "a.html")
//   "/a/b/"      -> (<root>/a/b,  "index.html")
//   "/a/b/c"     -> (<root>/a/b,  "c.html")
//   "/page.html" -> (<root>,      "page.html")
//
// The mapping is a pure function of the path string: no I/O, no clock, no
// randomness. Two distinct URLs mapping to the same LocalPath is an
// accepted edge case - last writer wins unless overwrite protection is on.
//
// Rust concepts:
// - PathBuf: an owned, OS-aware path we can push segments onto
// - Pure functions: easy to test exhaustively, nothing to mock
// =============================================================================

use std::path::PathBuf;

// Where a page lands on disk, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPath {
    /// Relative directory under the output root (empty = the root itself)
    pub directory: PathBuf,
    /// Final filename, extension included
    pub filename: String,
}

// Converts a URL path component into a LocalPath.
//
// The text after the final '/' is the filename candidate; every non-empty
// segment before it becomes a nested directory. An empty candidate (bare
// path or trailing slash) and the degenerate ".html"/".htm" candidates all
// become "index.html". Anything else gets a ".html" suffix unless it
// already has one, so the file tree stays browsable from disk.
pub fn to_local_path(url_path: &str) -> LocalPath {
    let (dir_part, candidate) = match url_path.rfind('/') {
        Some(idx) => (&url_path[..idx], &url_path[idx + 1..]),
        None => ("", url_path),
    };

    let mut directory = PathBuf::new();
    for segment in dir_part.split('/').filter(|s| !s.is_empty()) {
        directory.push(segment);
    }

    let filename = match candidate {
        "" | ".html" | ".htm" => "index.html".to_string(),
        name if name.ends_with(".html") || name.ends_with(".htm") => name.to_string(),
        name => format!("{name}.html"),
    };

    LocalPath {
        directory,
        filename,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_maps_to_index() {
        let lp = to_local_path("/");
        assert_eq!(lp.directory, PathBuf::new());
        assert_eq!(lp.filename, "index.html");
    }

    #[test]
    fn test_empty_path_maps_to_index() {
        let lp = to_local_path("");
        assert_eq!(lp.directory, PathBuf::new());
        assert_eq!(lp.filename, "index.html");
    }

    #[test]
    fn test_top_level_page_gets_html_suffix() {
        let lp = to_local_path("/a");
        assert_eq!(lp.directory, PathBuf::new());
        assert_eq!(lp.filename, "a.html");
    }

    #[test]
    fn test_trailing_slash_becomes_nested_index() {
        let lp = to_local_path("/a/b/");
        assert_eq!(lp.directory, PathBuf::from("a/b"));
        assert_eq!(lp.filename, "index.html");
    }

    #[test]
    fn test_nested_segments_become_directories() {
        let lp = to_local_path("/docs/guide/intro");
        assert_eq!(lp.directory, PathBuf::from("docs/guide"));
        assert_eq!(lp.filename, "intro.html");
    }

    #[test]
    fn test_existing_html_extension_is_kept() {
        let lp = to_local_path("/page.html");
        assert_eq!(lp.filename, "page.html");
        let lp = to_local_path("/old/page.htm");
        assert_eq!(lp.directory, PathBuf::from("old"));
        assert_eq!(lp.filename, "page.htm");
    }

    #[test]
    fn test_bare_extension_candidates_become_index() {
        assert_eq!(to_local_path("/a/.html").filename, "index.html");
        assert_eq!(to_local_path("/a/.htm").filename, "index.html");
    }

    #[test]
    fn test_mapping_is_deterministic() {
        // Pure function: same input, same output, every time
        let a = to_local_path("/x/y/z");
        let b = to_local_path("/x/y/z");
        assert_eq!(a, b);
    }
}
