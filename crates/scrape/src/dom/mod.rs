// ABOUTME: Minimal DOM capability interface the extractor queries, plus its scraper-backed implementation.
// ABOUTME: Page wraps a parsed HTML snapshot; the normalizer lives in the normalize submodule.

//! DOM access for the extraction core.
//!
//! The core never walks a concrete tree directly. It asks a [`DomNode`] for
//! the four things a browser content script would use: `querySelector`,
//! `querySelectorAll`, `textContent` and `innerHTML`. [`Page`] provides the
//! implementation over an in-memory `scraper` document; tests can supply
//! their own fake trees.

pub mod normalize;
pub mod selectors;

use scraper::{ElementRef, Html};

use self::selectors::get_or_compile;

/// Read-only view of a node in a document tree.
///
/// Selector strings that fail to parse match nothing.
pub trait DomNode: Sized {
    /// First descendant matching `selector`, in document order.
    fn query_selector(&self, selector: &str) -> Option<Self>;

    /// All descendants matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<Self>;

    /// Concatenated text of this node and its descendants.
    fn text_content(&self) -> String;

    /// Serialized markup of this node's children.
    fn inner_html(&self) -> String;
}

impl<'a> DomNode for ElementRef<'a> {
    fn query_selector(&self, selector: &str) -> Option<Self> {
        let sel = get_or_compile(selector)?;
        self.select(&sel).next()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<Self> {
        match get_or_compile(selector) {
            Some(sel) => self.select(&sel).collect(),
            None => Vec::new(),
        }
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn inner_html(&self) -> String {
        ElementRef::inner_html(self)
    }
}

/// A parsed page snapshot.
///
/// Hosts hand the core whatever markup is present at call time; nothing here
/// waits for or re-reads late content.
#[derive(Debug, Clone)]
pub struct Page {
    html: Html,
}

impl Page {
    /// Parses a full HTML document.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The document's root element, the node extraction starts from.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}
