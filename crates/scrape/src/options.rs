// ABOUTME: Configuration options for the scraping client and the fluent ClientBuilder.
// ABOUTME: Defaults use the builtin site registry and stamp profile scrapes with a capture time.

use crate::client::Client;
use crate::extractors::registry::SiteRegistry;

/// Configuration options for the scraping client.
#[derive(Debug, Clone)]
pub struct Options {
    /// Site table to classify against; `None` means the builtin table.
    pub registry: Option<SiteRegistry>,
    /// Whether profile records get a `scrapedAt` capture timestamp.
    pub stamp_profiles: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            registry: None,
            stamp_profiles: true,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Use a custom site registry instead of the builtin one.
    pub fn registry(mut self, registry: SiteRegistry) -> Self {
        self.opts.registry = Some(registry);
        self
    }

    /// Enable or disable the `scrapedAt` stamp on profile records.
    pub fn stamp_profiles(mut self, stamp: bool) -> Self {
        self.opts.stamp_profiles = stamp;
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
