// src/crawl/monitor.rs
// =============================================================================
// This module watches the worker pool and periodically reports liveness.
//
// Every second it counts the workers still running and names any that have
// finished since the last tick. It is purely observational:
// - It never touches the Frontier (no shared lock, no deadlock potential)
// - It only reads atomic flags the workers flip on exit
// - Its output goes through the same event stream as everything else
// If the monitor died tomorrow the crawl would finish exactly the same way.
//
// Rust concepts:
// - AtomicBool + Ordering::Relaxed: a one-way "I'm done" flag needs no
//   ordering guarantees beyond eventual visibility
// - tokio::time::interval: a periodic tick without drift
// =============================================================================

use crate::report::{send, CrawlEvent, EventSender};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

// One flag per worker; the worker flips it when its loop ends.
#[derive(Debug)]
pub struct WorkerStatus {
    name: String,
    alive: AtomicBool,
}

impl WorkerStatus {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alive: AtomicBool::new(true),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Called by the worker itself, exactly once, when its loop exits.
    pub fn finish(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }
}

// Runs until every worker has finished or cancellation is requested,
// emitting one Liveness event per tick.
pub async fn run_monitor(
    statuses: Vec<Arc<WorkerStatus>>,
    events: EventSender,
    mut cancel: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    // The first tick fires immediately; skip it so we don't report before
    // the workers have done anything
    ticker.tick().await;

    let mut already_reported: HashSet<String> = HashSet::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            changed = cancel.changed() => {
                // Err means the sender is gone; either way we're done
                if changed.is_err() || *cancel.borrow() {
                    return;
                }
            }
        }

        let alive = statuses.iter().filter(|s| s.is_alive()).count();
        let dead: Vec<String> = statuses
            .iter()
            .filter(|s| !s.is_alive())
            .map(|s| s.name().to_string())
            .filter(|name| already_reported.insert(name.clone()))
            .collect();

        send(&events, CrawlEvent::Liveness { alive, dead });

        if alive == 0 {
            return;
        }
    }
}
