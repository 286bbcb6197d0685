// ABOUTME: Field extractor interpreting one FieldDescriptor against a DOM node.
// ABOUTME: Missing elements degrade to empty values; the title field falls back to the first h1.

//! Descriptor-driven field extraction.
//!
//! Key behaviors:
//! - `SingleText` reads the first match's text content, trimmed.
//! - `SingleHtml` reads the first match's markup through [`clean_html`].
//! - `RepeatedList` reads every container match, either as flat text or as
//!   a record of sub-field texts, then drops items whose values are all
//!   empty.
//! - Nothing here fails: a selector that matches nothing yields `""` or `[]`.

use tracing::debug;

use crate::dom::normalize::clean_html;
use crate::dom::DomNode;
use crate::extractors::descriptor::{FieldDescriptor, SubField};
use crate::result::{FieldValue, ListItem};

/// Selector tried for the title field when its own selector misses.
pub const TITLE_FALLBACK_SELECTOR: &str = "h1";

/// Extracts one field's value from `root`.
pub fn extract_field<N: DomNode>(root: &N, descriptor: &FieldDescriptor) -> FieldValue {
    match descriptor {
        FieldDescriptor::SingleText { selector, title } => {
            FieldValue::Text(extract_text(root, selector, *title))
        }
        FieldDescriptor::SingleHtml { selector } => FieldValue::Text(extract_html(root, selector)),
        FieldDescriptor::RepeatedList { selector, fields } => {
            FieldValue::List(extract_list(root, selector, fields.as_deref()))
        }
    }
}

fn extract_text<N: DomNode>(root: &N, selector: &str, title: bool) -> String {
    if let Some(el) = root.query_selector(selector) {
        return el.text_content().trim().to_string();
    }
    if title {
        debug!(selector, "title selector missed, trying first h1");
        if let Some(h1) = root.query_selector(TITLE_FALLBACK_SELECTOR) {
            return h1.text_content().trim().to_string();
        }
    }
    debug!(selector, "no element found");
    String::new()
}

fn extract_html<N: DomNode>(root: &N, selector: &str) -> String {
    match root.query_selector(selector) {
        Some(el) => clean_html(el.inner_html().as_str()),
        None => {
            debug!(selector, "no element found");
            String::new()
        }
    }
}

fn extract_list<N: DomNode>(root: &N, selector: &str, fields: Option<&[SubField]>) -> Vec<ListItem> {
    let items = root.query_selector_all(selector);
    let total = items.len();

    let kept: Vec<ListItem> = items
        .iter()
        .map(|item| match fields {
            Some(fields) => ListItem::Record(
                fields
                    .iter()
                    .map(|sub| {
                        let value = item
                            .query_selector(&sub.selector)
                            .map(|el| el.text_content().trim().to_string())
                            .unwrap_or_default();
                        (sub.name.clone(), value)
                    })
                    .collect(),
            ),
            None => ListItem::Text(item.text_content().trim().to_string()),
        })
        .filter(|item| !item.is_empty())
        .collect();

    debug!(selector, matched = total, kept = kept.len(), "list extracted");
    kept
}
