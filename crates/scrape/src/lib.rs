// ABOUTME: Main library entry point for the jobhook page-scraping core.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, ScrapedRecord, ScrapeError, registry and descriptor types.

//! Declarative page scraping for job postings and professional profiles.
//!
//! A [`SiteRegistry`] maps site keys to ordered field descriptors. The
//! [`Client`] classifies a page address against it, runs each descriptor
//! over the page's DOM and returns a [`ScrapedRecord`] ready to forward.
//!
//! # Example
//!
//! ```
//! use jobhook_scrape::Client;
//!
//! let html = r#"<html><body>
//!     <h1 class="jobsearch-JobInfoHeader-title">Line Cook</h1>
//!     <div id="jobDescriptionText"><p>Prep.</p><p>Cook.</p></div>
//! </body></html>"#;
//!
//! let record = Client::default()
//!     .scrape_html("https://www.indeed.com/viewjob?jk=1", html)
//!     .unwrap();
//! assert_eq!(record.text("role"), Some("Line Cook"));
//! assert_eq!(record.text("description"), Some("Prep.\nCook."));
//! ```

pub mod classify;
pub mod client;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod options;
pub mod result;

pub use crate::classify::{classify, Classification};
pub use crate::client::Client;
pub use crate::dom::normalize::clean_html;
pub use crate::dom::{DomNode, Page};
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::extractors::descriptor::{FieldDescriptor, FieldSpec, SiteProfile, SubField};
pub use crate::extractors::field::extract_field;
pub use crate::extractors::loader::load_builtin_registry;
pub use crate::extractors::registry::{ContentKind, SiteEntry, SiteKey, SiteRegistry};
pub use crate::options::{ClientBuilder, Options};
pub use crate::result::{FieldValue, ListItem, ScrapedRecord};
