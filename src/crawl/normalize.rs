// src/crawl/normalize.rs
// =============================================================================
// This module turns raw href values into canonical URLs.
//
// A "canonical URL" is the single string form we use to deduplicate
// references to the same resource: absolute, fragment-stripped,
// scheme+host+path+query. Two hrefs that point at the same page must
// normalize to the *identical* string, otherwise the Frontier would fetch
// the page twice.
//
// The rules:
// 1. Root-relative hrefs ("/docs") resolve against the base's scheme+host
// 2. Relative hrefs ("../other") resolve against the base's full path
// 3. Scheme-bearing hrefs ("https://...") are treated as absolute - but
//    they still go through the same normalization as everything else, so
//    fragments are stripped and path segments resolved. (Earlier versions
//    of this tool passed scheme-bearing hrefs through untouched; that made
//    normalization non-idempotent and let "#frag" duplicates slip past the
//    dedup set.)
// 4. The fragment ("#section") is always stripped from the result
//
// Rust concepts:
// - Result<T, E>: parsing can fail, callers decide what to do about it
// - The url crate implements RFC 3986 reference resolution for us
// =============================================================================

use crate::error::CrawlError;
use url::Url;

// Normalizes an href against the URL of the page it was found on.
//
// Parameters:
//   base: canonical URL of the page the href came from
//   href: the raw href attribute value (relative or absolute)
//
// Returns: the canonical URL string, or MalformedUrl if nothing parseable
// can be made of the inputs. Callers skip such edges rather than aborting.
//
// Examples:
//   normalize("http://example.test/", "/a")        -> "http://example.test/a"
//   normalize("http://example.test/a/", "b")       -> "http://example.test/a/b"
//   normalize("http://example.test/", "a#frag")    -> "http://example.test/a"
//   normalize("http://example.test/a/../b", "")    -> "http://example.test/b"
pub fn normalize(base: &str, href: &str) -> Result<String, CrawlError> {
    let base_url = Url::parse(base).map_err(|source| CrawlError::MalformedUrl {
        input: base.to_string(),
        source,
    })?;

    // Url::join handles all three href shapes:
    // - a scheme-bearing href replaces the base entirely
    // - a root-relative href keeps scheme+host and replaces the path
    // - a relative href resolves against the base path (".." and "." too)
    let mut resolved = base_url
        .join(href)
        .map_err(|source| CrawlError::MalformedUrl {
            input: href.to_string(),
            source,
        })?;

    // Strip any fragment. "page#a" and "page#b" are the same resource.
    resolved.set_fragment(None);

    Ok(resolved.to_string())
}

// Extracts the path component of a canonical URL, which is what the path
// mapper turns into a local directory + filename.
pub fn path_of(url: &str) -> Result<String, CrawlError> {
    let parsed = Url::parse(url).map_err(|source| CrawlError::MalformedUrl {
        input: url.to_string(),
        source,
    })?;
    Ok(parsed.path().to_string())
}
