// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// There are no subcommands: the tool does one thing (mirror a site), so
// every option lives directly on the Cli struct.
// =============================================================================

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "site-mirror",
    version = "0.1.0",
    about = "Mirror a website into a local file tree",
    long_about = "site-mirror crawls a single website starting from a given page, follows \
                  same-site links, and saves every page into a directory tree that mirrors \
                  the URL structure. It fetches each page at most once and pauses politely \
                  between requests."
)]
pub struct Cli {
    /// Root URL of the site to mirror (e.g., https://example.com)
    ///
    /// A trailing slash is trimmed before the crawl is seeded.
    #[arg(short = 'b', long)]
    pub base_url: String,

    /// Path of the first page to fetch, relative to the base URL (e.g., /)
    #[arg(short = 'p', long)]
    pub first_page: String,

    /// Replace already-mirrored files instead of skipping them with an error
    #[arg(short = 'o', long)]
    pub overwrite: bool,

    /// Number of concurrent crawl workers
    #[arg(long, default_value_t = 8)]
    pub workers: usize,

    /// Politeness delay between fetches in milliseconds
    ///
    /// Each worker pauses this long (plus up to 25% random jitter) after
    /// every fetch, to limit request rate against the target site.
    #[arg(long, default_value_t = 100)]
    pub delay_ms: u64,

    /// Output directory for the mirrored file tree
    #[arg(long, default_value = "out")]
    pub output: String,

    /// Print the end-of-crawl summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_args_parse() {
        let cli = Cli::parse_from([
            "site-mirror",
            "-b",
            "http://example.test",
            "-p",
            "/",
        ]);
        assert_eq!(cli.base_url, "http://example.test");
        assert_eq!(cli.first_page, "/");
        assert!(!cli.overwrite);
        assert_eq!(cli.workers, 8);
        assert_eq!(cli.delay_ms, 100);
        assert_eq!(cli.output, "out");
    }

    #[test]
    fn test_all_flags_parse() {
        let cli = Cli::parse_from([
            "site-mirror",
            "--base-url",
            "http://example.test",
            "--first-page",
            "/start",
            "--overwrite",
            "--workers",
            "2",
            "--delay-ms",
            "250",
            "--output",
            "mirror",
            "--json",
        ]);
        assert!(cli.overwrite);
        assert_eq!(cli.workers, 2);
        assert_eq!(cli.delay_ms, 250);
        assert_eq!(cli.output, "mirror");
        assert!(cli.json);
    }
}
