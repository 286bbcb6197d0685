// ABOUTME: Process-wide cache of compiled CSS selectors keyed by their source text.
// ABOUTME: Invalid selectors are cached as misses so they are parsed at most once.

//! Selector caching for repeated DOM queries.
//!
//! Site tables are static and every scrape walks the same selectors, so each
//! selector string is compiled once and reused for every later query.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use scraper::Selector;

static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
///
/// Returns `None` for selectors that fail to parse; callers treat that the
/// same as a selector that matches nothing.
pub fn get_or_compile(css: &str) -> Option<Selector> {
    {
        let cache = SELECTOR_CACHE
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    let mut cache = SELECTOR_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    // Another thread may have filled the slot between the two locks.
    if let Some(cached) = cache.get(css) {
        return cached.clone();
    }
    cache.insert(css.to_string(), compiled.clone());
    compiled
}

/// Compiles a batch of selectors into the cache.
///
/// Called after a registry is built so the first scrape does not pay for
/// parsing.
pub fn precompile_selectors<I, S>(selectors: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cache = SELECTOR_CACHE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    for css in selectors {
        let css = css.as_ref();
        if !cache.contains_key(css) {
            cache.insert(css.to_string(), Selector::parse(css).ok());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_selector_is_cached() {
        assert!(get_or_compile(".jobs-description__content").is_some());
        assert!(get_or_compile(".jobs-description__content").is_some());
    }

    #[test]
    fn invalid_selector_is_a_cached_miss() {
        assert!(get_or_compile("[[[invalid").is_none());
        assert!(get_or_compile("[[[invalid").is_none());
    }

    #[test]
    fn precompile_warms_the_cache() {
        precompile_selectors(["#jobDescriptionText", "h1", "div > span:first-child"]);
        assert!(get_or_compile("#jobDescriptionText").is_some());
        assert!(get_or_compile("div > span:first-child").is_some());
    }
}
