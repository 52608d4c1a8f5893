// src/crawl/mod.rs
// =============================================================================
// This module contains the crawl coordination engine - the heart of the
// tool.
//
// Submodules:
// - normalize: turns raw hrefs into canonical URLs
// - frontier: the shared worklist + claimed set + in-flight counter
// - worker: the N-worker pool that drains the frontier
// - monitor: periodic worker-liveness reporting (purely observational)
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
// =============================================================================

mod frontier;
mod monitor;
pub mod normalize;
mod worker;

// Re-export public items from submodules
pub use frontier::{Claim, Frontier};
pub use worker::{run_pool, PoolConfig};
