// src/error.rs
// =============================================================================
// This file defines the typed errors that can happen during a crawl.
//
// Every error here is *local* to one URL or one file: it gets reported and
// the crawl moves on. Nothing in this enum is allowed to take down a worker,
// let alone the whole process. The only fatal condition in the program is a
// broken Frontier invariant, and that is a bug, not an error value.
//
// We use the `thiserror` crate to derive Display and std::error::Error,
// while `anyhow` stays at the application boundary in main.rs.
//
// Rust concepts:
// - Enums with data: each variant carries the context needed to diagnose it
// - #[derive(Error)]: thiserror generates the Display/Error boilerplate
// - #[error(...)]: the format string doubles as the Display impl
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

// All the ways a single crawl iteration can fail.
//
// The #[error(...)] strings become the Display output, which is what the
// reporter prints next to the offending URL.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The href (or the base it was found on) cannot be parsed as a URL.
    /// The edge is dropped; the crawl continues.
    #[error("malformed URL '{input}': {source}")]
    MalformedUrl {
        input: String,
        source: url::ParseError,
    },

    /// Network/transport failure or a non-2xx response.
    /// The fetch iteration aborts; no retry.
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The destination file already exists and --overwrite was not given.
    /// The already-written content is preserved.
    #[error("refusing to overwrite existing file {}", path.display())]
    DestinationExists { path: PathBuf },

    /// Directory creation or file write failed for a reason other than
    /// "already exists". The affected iteration aborts.
    #[error("filesystem error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = CrawlError::Fetch {
            url: "http://example.test/a".to_string(),
            reason: "HTTP 404".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("http://example.test/a"));
        assert!(text.contains("404"));
    }

    #[test]
    fn test_destination_exists_names_the_path() {
        let err = CrawlError::DestinationExists {
            path: PathBuf::from("out/a.html"),
        };
        assert!(err.to_string().contains("a.html"));
    }
}
