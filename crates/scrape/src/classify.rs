// ABOUTME: Page classifier mapping a page address to its registry entry and content kind.
// ABOUTME: The single gate where a scrape fails: unknown sites yield UnsupportedSite.

use tracing::debug;
use url::Url;

use crate::error::ScrapeError;
use crate::extractors::registry::{ContentKind, SiteEntry, SiteKey, SiteRegistry};

/// A page matched to a registry entry.
#[derive(Debug, Clone, Copy)]
pub struct Classification<'r> {
    pub entry: &'r SiteEntry,
}

impl<'r> Classification<'r> {
    pub fn site(&self) -> &'r SiteKey {
        self.entry.key()
    }

    pub fn kind(&self) -> ContentKind {
        self.entry.kind()
    }
}

/// Classifies `address` against `registry`.
///
/// The hostname comes from URL parsing, so it is already lower-cased and
/// punycode-encoded. Addresses that do not parse or carry no host cannot
/// match any site and are unsupported.
pub fn classify<'r>(
    registry: &'r SiteRegistry,
    address: &str,
) -> Result<Classification<'r>, ScrapeError> {
    let url = Url::parse(address).map_err(|_| ScrapeError::unsupported_site(address))?;
    let hostname = url
        .host_str()
        .ok_or_else(|| ScrapeError::unsupported_site(address))?;

    match registry.lookup(hostname, url.path()) {
        Some(entry) => {
            debug!(hostname, site = %entry.key(), kind = %entry.kind(), "page classified");
            Ok(Classification { entry })
        }
        None => {
            debug!(hostname, "no site matched");
            Err(ScrapeError::unsupported_site(address))
        }
    }
}
