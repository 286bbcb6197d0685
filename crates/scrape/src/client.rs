// ABOUTME: The scrape orchestrator: classifies a page, runs every field descriptor, assembles the record.
// ABOUTME: Provides scrape() over any DomNode and scrape_html() over a raw HTML snapshot.

use chrono::Utc;
use tracing::{debug, info};

use crate::classify::{classify, Classification};
use crate::dom::{DomNode, Page};
use crate::error::ScrapeError;
use crate::extractors::field::extract_field;
use crate::extractors::loader::load_builtin_registry;
use crate::extractors::registry::{ContentKind, SiteRegistry};
use crate::options::{ClientBuilder, Options};
use crate::result::ScrapedRecord;

/// Scraping client holding the resolved site registry.
///
/// The client keeps no state between scrapes; every call re-reads the
/// document it is given.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    registry: SiteRegistry,
}

impl Client {
    /// Create a client from options, loading the builtin registry when none
    /// is supplied.
    pub fn new(opts: Options) -> Self {
        let registry = opts.registry.clone().unwrap_or_else(load_builtin_registry);
        Self { opts, registry }
    }

    /// Start building a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The registry this client classifies against.
    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    /// Match `address` to a site entry.
    pub fn classify(&self, address: &str) -> Result<Classification<'_>, ScrapeError> {
        classify(&self.registry, address)
    }

    /// Scrape `root` as the page at `address`.
    ///
    /// Fails only when the site is unsupported, before touching `root`.
    /// Fields whose selectors miss come back empty.
    pub fn scrape<N: DomNode>(&self, address: &str, root: &N) -> Result<ScrapedRecord, ScrapeError> {
        let entry = self.classify(address)?.entry;

        let fields = entry
            .profile()
            .iter()
            .map(|spec| {
                let value = extract_field(root, &spec.descriptor);
                debug!(field = %spec.name, empty = value.is_empty(), "field extracted");
                (spec.name.clone(), value)
            })
            .collect();

        let scraped_at = match entry.kind() {
            ContentKind::Profile if self.opts.stamp_profiles => Some(Utc::now()),
            _ => None,
        };

        let record = ScrapedRecord {
            site: entry.key().clone(),
            kind: entry.kind(),
            fields,
            link: address.to_string(),
            scraped_at,
        };
        info!(site = %record.site, kind = %record.kind, link = %record.link, "scrape complete");
        Ok(record)
    }

    /// Parse `html` as the page at `address` and scrape it.
    ///
    /// Classification runs first, so unsupported pages are never parsed.
    pub fn scrape_html(&self, address: &str, html: &str) -> Result<ScrapedRecord, ScrapeError> {
        self.classify(address)?;
        let page = Page::parse(html);
        self.scrape(address, &page.root())
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
