// src/storage/mod.rs
// =============================================================================
// This module owns everything about the local mirror tree.
//
// Submodules:
// - paths: pure URL-path -> (directory, filename) mapping
// - writer: directory creation and overwrite-protected file writes
//
// The split keeps the pure mapping testable without touching the disk.
// =============================================================================

mod paths;
mod writer;

pub use paths::{to_local_path, LocalPath};
pub use writer::PageWriter;
