// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Seed the Frontier with the start page and wire up the event stream
// 3. Launch the worker pool and block until quiescence (or Ctrl+C)
// 4. Print the crawl summary and exit with proper code
//
// Exit codes:
//   0 = the crawl reached quiescence (queue empty, nothing in flight)
//   1 = the crawl was cancelled with Ctrl+C
//   2 = setup or internal error (bad start URL, client build failure, ...)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod crawl;    // src/crawl/ - frontier, workers, monitor, normalization
mod error;    // src/error.rs - typed per-URL crawl errors
mod extract;  // src/extract.rs - href extraction from HTML
mod fetch;    // src/fetch.rs - the HTTP collaborator
mod report;   // src/report/ - event stream, console sink, summary
mod storage;  // src/storage/ - path mapping and page persistence

use crate::crawl::{run_pool, Frontier, PoolConfig};
use crate::fetch::HttpFetcher;
use crate::report::{send, CrawlEvent, CrawlSummary};
use crate::storage::PageWriter;
use cli::Cli;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{anyhow, Result};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// The main application logic: set up, crawl to quiescence, summarize.
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // A trailing slash on the base URL is trimmed before seeding, so
    // "-b http://x/ -p /" doesn't produce "http://x//"
    let base_url = cli.base_url.trim_end_matches('/').to_string();
    let workers = cli.workers.max(1);

    let frontier = Arc::new(Frontier::seed(&base_url, &cli.first_page)?);
    let fetcher = Arc::new(HttpFetcher::new()?);
    let writer = PageWriter::new(&cli.output, cli.overwrite);

    // One event channel, one reporter task: this is what serializes all
    // console output without any lock near the Frontier
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let reporter = tokio::spawn(report::run_reporter(event_rx));

    // Cooperative cancellation: first Ctrl+C asks the workers to stop at
    // their next loop iteration, second Ctrl+C exits immediately
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let ctrlc_events = event_tx.clone();
    let ctrlc_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            send(&ctrlc_events, CrawlEvent::Cancelled);
            let _ = cancel_tx.send(true);
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("Force quit requested, exiting immediately...");
                std::process::exit(2);
            }
        }
    });

    println!(
        "🟢 Mirroring {} into {}/ with {} worker(s)",
        base_url, cli.output, workers
    );

    let cancelled_flag = cancel_rx.clone();
    run_pool(
        frontier.clone(),
        fetcher,
        writer,
        PoolConfig {
            workers,
            base_delay: Duration::from_millis(cli.delay_ms),
        },
        event_tx.clone(),
        cancel_rx,
    )
    .await;

    let cancelled = *cancelled_flag.borrow();

    // Tear down: stop listening for Ctrl+C, close the event stream so the
    // reporter drains and hands back the summary
    ctrlc_task.abort();
    drop(event_tx);
    let mut summary = reporter
        .await
        .map_err(|e| anyhow!("reporter task failed: {e}"))?;
    summary.urls_claimed = frontier.claimed_count();
    summary.completed = !cancelled;

    print_summary(&summary, cli.json)?;

    Ok(if cancelled { 1 } else { 0 })
}

// Prints the summary either as a table or JSON
fn print_summary(summary: &CrawlSummary, json: bool) -> Result<()> {
    if json {
        // Serialize the summary to JSON and print
        let json_output = serde_json::to_string_pretty(summary)?;
        println!("{}", json_output);
    } else {
        println!();
        println!("📊 Summary:");
        println!("   💾 Pages saved: {}", summary.pages_saved);
        if summary.pages_replaced > 0 {
            println!("   ❗ Overwritten: {}", summary.pages_replaced);
        }
        println!("   ✅ Links queued: {}", summary.links_queued);
        println!("   ‼️  Failures: {}", summary.failures);
        println!("   🌐 URLs claimed: {}", summary.urls_claimed);
        println!(
            "   {} {}",
            if summary.completed { "🏁" } else { "🛑" },
            if summary.completed {
                "Crawl reached quiescence"
            } else {
                "Crawl was cancelled"
            }
        );
    }
    Ok(())
}
