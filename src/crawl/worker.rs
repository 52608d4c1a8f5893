// src/crawl/worker.rs
// =============================================================================
// This module runs the worker pool: N independent tokio tasks draining one
// shared Frontier until it is exhausted.
//
// Each worker loops:
// 1. Claim the next URL (Frontier guarantees exclusive ownership)
// 2. Fetch it; a failure is reported and the iteration ends there
// 3. Extract hrefs and extend the frontier (fetched URL = new base)
// 4. Map the URL path to a local file and persist the body
// 5. Mark the claim complete, then sleep the politeness delay
//
// Two rules keep the pool robust:
// - No error in one iteration may kill the worker, let alone the pool.
//   Every failure becomes a Failed event and the loop continues.
// - Every Claim::Ready is paired with exactly one complete() call, even on
//   the failure paths - otherwise quiescence detection hangs forever.
//
// Cancellation is cooperative: a watch flag checked at the top of every
// iteration and raced against both sleeps, so Ctrl+C never waits for a
// politeness delay to elapse.
//
// Rust concepts:
// - Arc<dyn Fetch>: workers share the fetcher without knowing its type
// - tokio::select!: race a sleep against the cancellation signal
// - futures::future::join_all: wait for the whole pool at once
// =============================================================================

use crate::crawl::frontier::{Claim, Frontier};
use crate::crawl::monitor::{run_monitor, WorkerStatus};
use crate::crawl::normalize::path_of;
use crate::extract::extract_hrefs;
use crate::fetch::Fetch;
use crate::report::{send, CrawlEvent, EventSender};
use crate::storage::{to_local_path, PageWriter};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

// How long a worker naps when the queue is momentarily empty but other
// workers are still mid-fetch (Claim::Wait).
const IDLE_BACKOFF: Duration = Duration::from_millis(20);

// Pool-wide knobs, straight from the CLI.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of concurrent workers
    pub workers: usize,
    /// Politeness delay between fetches issued by one worker
    pub base_delay: Duration,
}

// Runs the full pool (workers + monitor) to quiescence or cancellation.
pub async fn run_pool(
    frontier: Arc<Frontier>,
    fetcher: Arc<dyn Fetch>,
    writer: PageWriter,
    config: PoolConfig,
    events: EventSender,
    cancel: watch::Receiver<bool>,
) {
    let statuses: Vec<Arc<WorkerStatus>> = (0..config.workers)
        .map(|i| Arc::new(WorkerStatus::new(format!("worker-{i}"))))
        .collect();

    let monitor = tokio::spawn(run_monitor(
        statuses.clone(),
        events.clone(),
        cancel.clone(),
    ));

    let handles: Vec<_> = statuses
        .iter()
        .map(|status| {
            tokio::spawn(run_worker(
                frontier.clone(),
                fetcher.clone(),
                writer.clone(),
                config.base_delay,
                events.clone(),
                cancel.clone(),
                status.clone(),
            ))
        })
        .collect();

    futures::future::join_all(handles).await;
    let _ = monitor.await;
}

// One worker's life: claim, process, complete, sleep - until the frontier
// is exhausted or cancellation is requested.
async fn run_worker(
    frontier: Arc<Frontier>,
    fetcher: Arc<dyn Fetch>,
    writer: PageWriter,
    base_delay: Duration,
    events: EventSender,
    mut cancel: watch::Receiver<bool>,
    status: Arc<WorkerStatus>,
) {
    loop {
        if *cancel.borrow() {
            break;
        }

        match frontier.claim_next() {
            Claim::Ready { url, .. } => {
                // All per-URL errors are handled inside; nothing escapes
                process_claim(&frontier, fetcher.as_ref(), &writer, &url, &events).await;
                frontier.complete();
                polite_pause(base_delay, &mut cancel).await;
            }
            Claim::Wait => {
                // Another worker may still extend the queue; nap and retry
                tokio::select! {
                    _ = tokio::time::sleep(IDLE_BACKOFF) => {}
                    _ = cancel.changed() => {}
                }
            }
            Claim::Exhausted => {
                send(
                    &events,
                    CrawlEvent::WorkerFinished {
                        name: status.name().to_string(),
                    },
                );
                break;
            }
        }
    }

    status.finish();
}

// One claimed URL, start to finish. Failures become events, never returns.
async fn process_claim(
    frontier: &Frontier,
    fetcher: &dyn Fetch,
    writer: &PageWriter,
    url: &str,
    events: &EventSender,
) {
    send(events, CrawlEvent::Downloading { url: url.to_string() });

    let body = match fetcher.fetch(url).await {
        Ok(body) => body,
        Err(e) => {
            send(
                events,
                CrawlEvent::Failed {
                    url: url.to_string(),
                    error: e.to_string(),
                },
            );
            return;
        }
    };

    // The fetched URL is the base for every link found on its page
    let hrefs = extract_hrefs(&body);
    let added = frontier.extend(url, &hrefs);
    send(
        events,
        CrawlEvent::Queued {
            url: url.to_string(),
            added,
            pending: frontier.pending_count(),
        },
    );

    // A claimed URL always parses - the Frontier already did. Still, be
    // graceful rather than certain:
    let url_path = match path_of(url) {
        Ok(path) => path,
        Err(e) => {
            send(
                events,
                CrawlEvent::Failed {
                    url: url.to_string(),
                    error: e.to_string(),
                },
            );
            return;
        }
    };

    let local = to_local_path(&url_path);
    match writer.write_page(&local, &body) {
        Ok((destination, replaced)) => send(
            events,
            CrawlEvent::Saved {
                url: url.to_string(),
                path: destination.display().to_string(),
                replaced,
            },
        ),
        Err(e) => send(
            events,
            CrawlEvent::Failed {
                url: url.to_string(),
                error: e.to_string(),
            },
        ),
    }
}

// The politeness delay: base + up to 25% random jitter, raced against
// cancellation so shutdown doesn't wait out the sleep.
async fn polite_pause(base_delay: Duration, cancel: &mut watch::Receiver<bool>) {
    let jitter = base_delay.mul_f64(rand::thread_rng().gen::<f64>() * 0.25);
    tokio::select! {
        _ = tokio::time::sleep(base_delay + jitter) => {}
        _ = cancel.changed() => {}
    }
}
