// src/crawl/frontier.rs
// =============================================================================
// This module implements the Frontier: the shared crawl state every worker
// mutates for the whole lifetime of the crawl.
//
// The Frontier owns three things, all behind ONE mutex:
// 1. A FIFO queue of unresolved (base, href) edges, in discovery order
// 2. The set of canonical URLs already claimed (fetched or being fetched)
// 3. An in-flight counter of claims whose iteration hasn't finished yet
//
// The one property this file absolutely cannot relax: a canonical URL
// enters the claimed set atomically with its removal from future
// scheduling. No two workers may ever fetch the same canonical URL, no
// matter how the N workers interleave.
//
// Why the in-flight counter? A momentarily empty queue does NOT mean the
// crawl is done - a worker that is mid-fetch may still extend the queue
// with links from its page. Emptiness is only final when the queue is
// empty AND nobody is in flight. Treating "queue empty right now" as done
// makes workers quit early and the crawl end with pages missing.
//
// Rust concepts:
// - Mutex<Inner>: one lock guards all three pieces of state together
// - VecDeque: efficient FIFO (push_back / pop_front)
// - HashSet: O(1) "have we claimed this URL?" lookups
// =============================================================================

use crate::crawl::normalize::normalize;
use crate::error::CrawlError;
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use url::Url;

// A discovered, not-yet-resolved link: the page it was found on plus the
// raw href attribute value. Resolution to a canonical URL happens inside
// the Frontier, at claim/extend time.
#[derive(Debug, Clone)]
pub struct LinkEdge {
    pub base: String,
    pub href: String,
}

// What a worker gets back from claim_next().
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// A claimed edge: the page it came from and its canonical URL.
    /// The caller now exclusively owns fetching this URL and MUST call
    /// complete() when its iteration finishes, success or failure.
    Ready { base: String, url: String },
    /// The queue is empty but another worker is mid-iteration and may
    /// still extend it. Back off briefly and ask again.
    Wait,
    /// The queue is empty and nothing is in flight. The crawl is over;
    /// the worker should exit.
    Exhausted,
}

// Everything the mutex guards. Kept private so nothing outside this file
// can touch the queue or the claimed set without holding the lock.
#[derive(Debug, Default)]
struct FrontierInner {
    pending: VecDeque<LinkEdge>,
    claimed: HashSet<String>,
    in_flight: usize,
}

/// The shared crawl worklist plus the set of already-claimed URLs.
pub struct Frontier {
    inner: Mutex<FrontierInner>,
    /// Host of the seed URL; edges resolving to any other host are
    /// discarded (single-site crawl).
    site_host: String,
    /// Scheme of the seed URL. Same-host links on the sibling scheme
    /// (http vs https) are folded onto this one, so an "https://" anchor
    /// to a page we already fetched over "http://" dedups instead of
    /// being mirrored twice.
    site_scheme: String,
}

impl Frontier {
    // Creates a Frontier seeded with one edge (start_url, first_page).
    //
    // Returns MalformedUrl if the start URL doesn't parse or has no host,
    // because then the same-site filter would discard every single edge.
    pub fn seed(start_url: &str, first_page: &str) -> Result<Self, CrawlError> {
        let seed_url = Url::parse(start_url).map_err(|source| CrawlError::MalformedUrl {
            input: start_url.to_string(),
            source,
        })?;
        let site_host = seed_url
            .host_str()
            .ok_or(CrawlError::MalformedUrl {
                input: start_url.to_string(),
                source: url::ParseError::EmptyHost,
            })?
            .to_string();
        let site_scheme = seed_url.scheme().to_string();

        let mut pending = VecDeque::new();
        pending.push_back(LinkEdge {
            base: start_url.to_string(),
            href: first_page.to_string(),
        });

        Ok(Self {
            inner: Mutex::new(FrontierInner {
                pending,
                claimed: HashSet::new(),
                in_flight: 0,
            }),
            site_host,
            site_scheme,
        })
    }

    // Resolves an edge to its canonical, same-site URL.
    //
    // Returns None for edges the crawl should never schedule: malformed
    // hrefs, hostless links (mailto:, tel:), and off-site hosts. Same-host
    // links on the sibling http/https scheme are folded onto the seed's
    // scheme so they share one canonical form.
    fn canonicalize(&self, base: &str, href: &str) -> Option<String> {
        let resolved = normalize(base, href).ok()?;
        let mut url = Url::parse(&resolved).ok()?;

        if url.host_str() != Some(self.site_host.as_str()) {
            return None; // Off-site or hostless
        }

        if matches!(url.scheme(), "http" | "https") && url.scheme() != self.site_scheme {
            // set_scheme only permits compatible switches; http<->https is
            // always one of them
            let _ = url.set_scheme(&self.site_scheme);
        }

        Some(url.to_string())
    }

    // Atomically claims the next fetchable URL.
    //
    // Pops edges off the queue until one resolves to a canonical URL that
    // hasn't been claimed yet (skip-and-advance: already-claimed or
    // malformed edges are simply discarded). The winning URL is inserted
    // into the claimed set and the in-flight counter bumped BEFORE the
    // lock is released, so no other worker can claim it.
    pub fn claim_next(&self) -> Claim {
        let mut inner = self.inner.lock().expect("frontier mutex poisoned");

        while let Some(edge) = inner.pending.pop_front() {
            // Edges were already filtered in extend(), but the seed edge
            // comes in raw, so resolve defensively here too.
            let url = match self.canonicalize(&edge.base, &edge.href) {
                Some(url) => url,
                None => continue,
            };

            if inner.claimed.contains(&url) {
                continue; // Someone beat us to it; try the next edge
            }

            inner.claimed.insert(url.clone());
            inner.in_flight += 1;
            return Claim::Ready {
                base: edge.base,
                url,
            };
        }

        // Queue drained. Final only if nobody can still extend it.
        if inner.in_flight == 0 {
            Claim::Exhausted
        } else {
            Claim::Wait
        }
    }

    // Adds newly discovered hrefs to the queue, in document order.
    //
    // Each href is normalized against `base`. Edges are discarded when:
    // - they don't parse as a URL (malformed)
    // - their canonical URL is already claimed (dedup)
    // - they resolve to a different host (single-site crawl)
    //
    // Returns the number of edges actually appended.
    pub fn extend(&self, base: &str, hrefs: &[String]) -> usize {
        let mut inner = self.inner.lock().expect("frontier mutex poisoned");
        let mut added = 0;

        for href in hrefs {
            // Drops malformed, hostless, and off-site edges in one go
            let url = match self.canonicalize(base, href) {
                Some(url) => url,
                None => continue,
            };

            if inner.claimed.contains(&url) {
                continue; // Already fetched or being fetched
            }

            inner.pending.push_back(LinkEdge {
                base: base.to_string(),
                href: href.clone(),
            });
            added += 1;
        }

        added
    }

    // Marks one claimed iteration as finished (success OR failure).
    // Every Claim::Ready must be paired with exactly one complete() call,
    // otherwise the crawl never reaches quiescence.
    pub fn complete(&self) {
        let mut inner = self.inner.lock().expect("frontier mutex poisoned");
        debug_assert!(inner.in_flight > 0, "complete() without a claim");
        inner.in_flight = inner.in_flight.saturating_sub(1);
    }

    // How many canonical URLs have been claimed so far.
    // The claimed set only ever grows, so this is monotonic.
    pub fn claimed_count(&self) -> usize {
        self.inner.lock().expect("frontier mutex poisoned").claimed.len()
    }

    // How many edges are waiting in the queue right now.
    // Purely informational (used in progress messages).
    pub fn pending_count(&self) -> usize {
        self.inner.lock().expect("frontier mutex poisoned").pending.len()
    }

    // Sorted snapshot of the claimed set, for asserting exactly which
    // pages a crawl visited.
    #[cfg(test)]
    pub fn claimed_urls(&self) -> Vec<String> {
        let inner = self.inner.lock().expect("frontier mutex poisoned");
        let mut urls: Vec<String> = inner.claimed.iter().cloned().collect();
        urls.sort();
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Frontier {
        Frontier::seed("http://example.test", "/").unwrap()
    }

    #[test]
    fn test_seed_produces_one_claim() {
        let frontier = seeded();
        match frontier.claim_next() {
            Claim::Ready { url, .. } => assert_eq!(url, "http://example.test/"),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn test_same_url_is_never_claimed_twice() {
        let frontier = seeded();
        let first = frontier.claim_next();
        assert!(matches!(first, Claim::Ready { .. }));

        // The seed edge is in flight, so the queue being empty is not final
        assert_eq!(frontier.claim_next(), Claim::Wait);

        // Re-discovering the same page (with and without fragment) adds nothing
        let added = frontier.extend(
            "http://example.test/",
            &["/".to_string(), "/#top".to_string()],
        );
        assert_eq!(added, 0);

        frontier.complete();
        assert_eq!(frontier.claim_next(), Claim::Exhausted);
    }

    #[test]
    fn test_fragment_duplicates_collapse() {
        let frontier = seeded();
        let _ = frontier.claim_next();
        frontier.extend(
            "http://example.test/",
            &["/a".to_string(), "http://example.test/a#frag".to_string()],
        );
        frontier.complete();

        // Both edges resolve to the same canonical URL; only one claim
        match frontier.claim_next() {
            Claim::Ready { url, .. } => assert_eq!(url, "http://example.test/a"),
            other => panic!("expected Ready, got {other:?}"),
        }
        frontier.complete();
        assert_eq!(frontier.claim_next(), Claim::Exhausted);
    }

    #[test]
    fn test_sibling_scheme_folds_onto_seed_scheme() {
        // An https anchor to a page on the http seed host is the same page
        let frontier = seeded();
        let _ = frontier.claim_next();
        frontier.extend(
            "http://example.test/",
            &["/a".to_string(), "https://example.test/a#frag".to_string()],
        );
        frontier.complete();

        let mut claimed = Vec::new();
        while let Claim::Ready { url, .. } = frontier.claim_next() {
            claimed.push(url);
            frontier.complete();
        }
        assert_eq!(claimed, vec!["http://example.test/a"]);
    }

    #[test]
    fn test_offsite_links_are_discarded() {
        let frontier = seeded();
        let _ = frontier.claim_next();
        let added = frontier.extend(
            "http://example.test/",
            &[
                "http://elsewhere.test/a".to_string(),
                "mailto:someone@example.test".to_string(),
                "/kept".to_string(),
            ],
        );
        assert_eq!(added, 1);
    }

    #[test]
    fn test_malformed_hrefs_are_dropped_not_fatal() {
        let frontier = seeded();
        let _ = frontier.claim_next();
        let added = frontier.extend(
            "http://example.test/",
            &["http://[bad".to_string(), "/ok".to_string()],
        );
        assert_eq!(added, 1);
    }

    #[test]
    fn test_quiescence_needs_empty_queue_and_zero_in_flight() {
        let frontier = seeded();
        let _ = frontier.claim_next(); // in_flight = 1, queue empty
        assert_eq!(frontier.claim_next(), Claim::Wait);

        // The in-flight worker discovers a link before completing
        frontier.extend("http://example.test/", &["/a".to_string()]);
        frontier.complete(); // in_flight = 0 but the queue has /a

        match frontier.claim_next() {
            Claim::Ready { url, .. } => assert_eq!(url, "http://example.test/a"),
            other => panic!("expected Ready, got {other:?}"),
        }
        frontier.complete();
        assert_eq!(frontier.claim_next(), Claim::Exhausted);
    }

    #[test]
    fn test_claims_come_out_in_discovery_order() {
        let frontier = seeded();
        let _ = frontier.claim_next();
        frontier.extend(
            "http://example.test/",
            &["/a".to_string(), "/b".to_string(), "/c".to_string()],
        );
        frontier.complete();

        let mut order = Vec::new();
        while let Claim::Ready { url, .. } = frontier.claim_next() {
            order.push(url);
            frontier.complete();
        }
        assert_eq!(
            order,
            vec![
                "http://example.test/a",
                "http://example.test/b",
                "http://example.test/c"
            ]
        );
    }

    #[test]
    fn test_claimed_set_is_monotonic() {
        let frontier = seeded();
        let _ = frontier.claim_next();
        frontier.complete();
        let before = frontier.claimed_count();
        frontier.extend("http://example.test/", &["/a".to_string()]);
        let _ = frontier.claim_next();
        frontier.complete();
        assert!(frontier.claimed_count() > before);
    }
}
