// src/report/mod.rs
// =============================================================================
// This module is the console/status sink, rebuilt as a structured event
// stream.
//
// Workers and the monitor never print directly. They send CrawlEvent values
// over one mpsc channel; a single reporter task consumes the stream and
// writes line-oriented output. That gives us two things for free:
// - Concurrent writes are serialized (one consumer = no interleaved garbage)
// - Reporting can never deadlock against the Frontier lock, because the
//   reporter owns no lock at all
//
// Losing a status message never affects crawl correctness, which is why
// every send in the codebase is a `let _ = tx.send(...)`.
//
// The reporter also tallies a CrawlSummary as events flow past, returned
// when the channel closes and printable as a table or as JSON (--json).
//
// Rust concepts:
// - mpsc::UnboundedSender: many producers, one consumer, no backpressure
// - The reporter task ends naturally when every sender is dropped
// =============================================================================

use serde::Serialize;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

// Everything the crawl can tell the outside world about its progress.
#[derive(Debug, Clone)]
pub enum CrawlEvent {
    /// A worker claimed a URL and is about to fetch it.
    Downloading { url: String },
    /// New links were appended to the frontier after a page was parsed.
    Queued { url: String, added: usize, pending: usize },
    /// A page body was persisted. `replaced` means --overwrite clobbered
    /// an existing file.
    Saved { url: String, path: String, replaced: bool },
    /// A per-URL error: fetch failure, existing destination, filesystem
    /// trouble. Reported and skipped, never fatal.
    Failed { url: String, error: String },
    /// Periodic worker-liveness snapshot from the monitor.
    Liveness { alive: usize, dead: Vec<String> },
    /// A worker exited because the frontier was exhausted.
    WorkerFinished { name: String },
    /// Cooperative cancellation was requested (Ctrl+C).
    Cancelled,
}

// End-of-crawl totals, printed as a table or serialized with --json.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CrawlSummary {
    /// Pages fetched and written to disk
    pub pages_saved: usize,
    /// Pages where an existing file was replaced (--overwrite)
    pub pages_replaced: usize,
    /// Total links appended to the frontier
    pub links_queued: usize,
    /// Per-URL failures (fetch errors, existing destinations, fs errors)
    pub failures: usize,
    /// Distinct canonical URLs claimed over the crawl's lifetime.
    /// Filled in by main after quiescence.
    pub urls_claimed: usize,
    /// Whether the crawl reached quiescence (false = cancelled)
    pub completed: bool,
}

pub type EventSender = UnboundedSender<CrawlEvent>;

// Convenience wrapper so call sites stay short. Delivery failure is
// deliberately ignored: the sink going away must never affect the crawl.
pub fn send(tx: &EventSender, event: CrawlEvent) {
    let _ = tx.send(event);
}

// The reporter task: drains the event stream, prints progress lines, and
// returns the accumulated summary once every sender is gone.
pub async fn run_reporter(mut rx: UnboundedReceiver<CrawlEvent>) -> CrawlSummary {
    let mut summary = CrawlSummary::default();

    while let Some(event) = rx.recv().await {
        match event {
            CrawlEvent::Downloading { url } => {
                println!("⤵️  Downloading {url}");
            }
            CrawlEvent::Queued { url, added, pending } => {
                summary.links_queued += added;
                if added > 0 {
                    println!("✅ Queued {added} new link(s) from {url} ({pending} pending)");
                }
            }
            CrawlEvent::Saved { url, path, replaced } => {
                summary.pages_saved += 1;
                if replaced {
                    summary.pages_replaced += 1;
                    println!("❗ Overwrote {path} ({url})");
                } else {
                    println!("💾 Saved {url} -> {path}");
                }
            }
            CrawlEvent::Failed { url, error } => {
                summary.failures += 1;
                eprintln!("‼️  Error at {url}: {error}");
            }
            CrawlEvent::Liveness { alive, dead } => {
                println!("👍 {alive} worker(s) still living");
                for name in dead {
                    println!("💀 Worker {name} has finished");
                }
            }
            CrawlEvent::WorkerFinished { name } => {
                println!("🏁 Worker {name} done (frontier exhausted)");
            }
            CrawlEvent::Cancelled => {
                println!("🛑 Cancellation requested, workers are stopping...");
            }
        }
    }

    summary
}
