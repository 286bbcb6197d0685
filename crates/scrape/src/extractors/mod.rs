// ABOUTME: Site-specific extraction: descriptors, the registry that holds them, and the field extractor.
// ABOUTME: The builtin registry is embedded JSON loaded by the loader submodule.

//! Extraction module.
//!
//! Submodules:
//! - `descriptor`: field descriptors and per-site profiles (pure data).
//! - `registry`: ordered site table with first-match-wins lookup.
//! - `loader`: the builtin site table.
//! - `field`: interprets one descriptor against a DOM node.

pub mod descriptor;
pub mod field;
pub mod loader;
pub mod registry;
