// ABOUTME: Selector registry mapping site keys to field profiles, with first-match-wins lookup.
// ABOUTME: Entries are validated on registration and never mutated afterwards.

//! Site registry.
//!
//! Entries are kept in definition order. A lookup returns the first entry
//! whose [`SiteKey`] is a substring of the page's hostname (so subdomains
//! match) and whose optional path pattern accepts the page path. The path
//! pattern is how one domain carries both a profile table and a job table.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dom::selectors::precompile_selectors;
use crate::error::ScrapeError;
use crate::extractors::descriptor::SiteProfile;

/// What kind of page a registry entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Job,
    Profile,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContentKind::Job => "job",
            ContentKind::Profile => "profile",
        };
        write!(f, "{}", s)
    }
}

/// Domain-suffix string used as the registry lookup key, e.g. `linkedin.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteKey(String);

impl SiteKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substring containment against an already-normalized hostname.
    pub fn matches(&self, hostname: &str) -> bool {
        hostname.contains(self.0.as_str())
    }
}

impl fmt::Display for SiteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire form of one registry entry.
#[derive(Debug, Deserialize)]
struct SiteEntryDef {
    site: String,
    kind: ContentKind,
    #[serde(default)]
    path: Option<String>,
    fields: SiteProfile,
}

/// One supported site: key, content kind, optional path gate and profile.
#[derive(Debug, Clone)]
pub struct SiteEntry {
    key: SiteKey,
    kind: ContentKind,
    path: Option<Regex>,
    profile: SiteProfile,
}

impl SiteEntry {
    /// Creates an entry, rejecting empty keys, names and selectors.
    pub fn new(
        site: impl Into<String>,
        kind: ContentKind,
        profile: SiteProfile,
    ) -> Result<Self, ScrapeError> {
        let key = SiteKey::new(site);
        validate(&key, &profile)?;
        Ok(Self {
            key,
            kind,
            path: None,
            profile,
        })
    }

    /// Restricts the entry to pages whose URL path matches `pattern`.
    pub fn with_path(mut self, pattern: &str) -> Result<Self, ScrapeError> {
        let re = Regex::new(pattern).map_err(|e| {
            ScrapeError::registry(format!("{} path", self.key), Some(anyhow::Error::new(e)))
        })?;
        self.path = Some(re);
        Ok(self)
    }

    pub fn key(&self) -> &SiteKey {
        &self.key
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    pub fn path_pattern(&self) -> Option<&str> {
        self.path.as_ref().map(Regex::as_str)
    }

    /// True when the key is contained in `hostname` and the path gate, if
    /// any, accepts `path`.
    pub fn matches(&self, hostname: &str, path: &str) -> bool {
        self.key.matches(hostname) && self.path.as_ref().map_or(true, |re| re.is_match(path))
    }
}

fn validate(key: &SiteKey, profile: &SiteProfile) -> Result<(), ScrapeError> {
    if key.as_str().trim().is_empty() {
        return Err(ScrapeError::registry(
            "<unnamed site>",
            Some(anyhow::anyhow!("site key is empty")),
        ));
    }
    for spec in profile.iter() {
        let target = format!("{}/{}", key, spec.name);
        if spec.name.trim().is_empty() {
            return Err(ScrapeError::registry(
                target,
                Some(anyhow::anyhow!("field name is empty")),
            ));
        }
        if spec.descriptor.selector().trim().is_empty() {
            return Err(ScrapeError::registry(
                target,
                Some(anyhow::anyhow!("selector is empty")),
            ));
        }
        for sub in spec.descriptor.sub_fields() {
            if sub.selector.trim().is_empty() {
                return Err(ScrapeError::registry(
                    format!("{}.{}", target, sub.name),
                    Some(anyhow::anyhow!("selector is empty")),
                ));
            }
        }
    }
    Ok(())
}

/// Ordered collection of site entries.
#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    entries: Vec<SiteEntry>,
}

impl SiteRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON array of site entries.
    pub fn from_json(json: &str) -> Result<Self, ScrapeError> {
        let defs: Vec<SiteEntryDef> = serde_json::from_str(json)
            .map_err(|e| ScrapeError::registry("site table", Some(anyhow::Error::new(e))))?;

        let mut registry = Self::new();
        for def in defs {
            let mut entry = SiteEntry::new(def.site, def.kind, def.fields)?;
            if let Some(pattern) = def.path {
                entry = entry.with_path(&pattern)?;
            }
            registry.register(entry);
        }
        Ok(registry)
    }

    /// Appends an entry after all existing ones.
    pub fn register(&mut self, entry: SiteEntry) {
        precompile_selectors(entry.profile.selectors());
        self.entries.push(entry);
    }

    /// First entry, in definition order, matching the hostname and path.
    pub fn lookup(&self, hostname: &str, path: &str) -> Option<&SiteEntry> {
        self.entries.iter().find(|e| e.matches(hostname, path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SiteEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
