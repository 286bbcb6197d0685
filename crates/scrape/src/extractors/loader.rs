// ABOUTME: Loader for the builtin site registry embedded as JSON at compile time.
// ABOUTME: Provides load_builtin_registry() to initialize the default SiteRegistry.

//! Builtin site registry loader.
//!
//! The site table is a versioned artifact that ships inside the binary; there
//! is no runtime path that edits it.

use crate::extractors::registry::SiteRegistry;

/// Embedded JSON containing the supported job and profile sites.
const BUILTIN_SITES_JSON: &str = include_str!("../../data/sites.json");

/// Loads the builtin site registry from embedded JSON.
///
/// # Panics
///
/// Panics if the embedded JSON is malformed or fails validation.
pub fn load_builtin_registry() -> SiteRegistry {
    SiteRegistry::from_json(BUILTIN_SITES_JSON).expect("failed to parse builtin site registry")
}
