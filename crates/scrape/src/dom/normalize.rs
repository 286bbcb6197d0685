// ABOUTME: Content normalizer turning markup fragments into clean multi-line plain text.
// ABOUTME: Works on a detached parse of the fragment so the live page is never touched.

//! Markup to plain text conversion for HTML-typed fields.
//!
//! The pipeline, each step feeding the next:
//! 1. parse the fragment into a detached tree
//! 2. drop `script`, `style` and `button` subtrees
//! 3. serialize, turning `<br>` into `\n` and `</p>` into `\n\n`
//! 4. replace every remaining tag with a space
//! 5. turn `&nbsp;` into a space
//! 6. collapse runs of spaces/tabs and trim
//! 7. trim each line, drop empty ones, rejoin with `\n`
//!
//! Step 7 also swallows the blank line step 3 puts between paragraphs, so
//! paragraphs come out one per line.

use std::collections::HashSet;

use ego_tree::{NodeId, NodeRef};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Node, Selector};

/// Elements removed with their whole subtree before serialization.
const STRIPPED_ELEMENTS: &str = "script, style, button";

static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static PARAGRAPH_CLOSE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</p>").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static HORIZONTAL_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").unwrap());

/// Converts a markup fragment into clean plain text.
///
/// Accepts `&str` or `Option<&str>`; empty and absent input return an empty
/// string without building a tree. The HTML parser recovers from any input,
/// so malformed markup degrades to whatever text it could salvage rather
/// than failing.
pub fn clean_html<'a>(html: impl Into<Option<&'a str>>) -> String {
    let html = match html.into() {
        Some(h) if !h.is_empty() => h,
        _ => return String::new(),
    };

    let fragment = Html::parse_fragment(html);
    let skip = collect_stripped(&fragment);
    let markup = serialize_without(&fragment, &skip);

    let markup = LINE_BREAK_RE.replace_all(&markup, "\n");
    let markup = PARAGRAPH_CLOSE_RE.replace_all(&markup, "\n\n");
    let text = TAG_RE.replace_all(&markup, " ");
    let text = unescape_text(&text.replace("&nbsp;", " "));
    let text = HORIZONTAL_WS_RE.replace_all(&text, " ");

    text.trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ids of every node whose subtree is left out of the serialized markup.
fn collect_stripped(fragment: &Html) -> HashSet<NodeId> {
    let mut skip = HashSet::new();
    if let Ok(selector) = Selector::parse(STRIPPED_ELEMENTS) {
        for el in fragment.select(&selector) {
            skip.insert(el.id());
        }
    }
    skip
}

/// Serializes the fragment's children, skipping stripped subtrees.
///
/// Attributes and comments are dropped: the next steps only look at tag
/// names and text.
fn serialize_without(fragment: &Html, skip: &HashSet<NodeId>) -> String {
    let mut out = String::new();
    for child in fragment.root_element().children() {
        serialize_node(child, skip, &mut out);
    }
    out
}

fn serialize_node(node: NodeRef<Node>, skip: &HashSet<NodeId>, out: &mut String) {
    if skip.contains(&node.id()) {
        return;
    }
    match node.value() {
        Node::Text(text) => escape_text(text, out),
        Node::Element(el) => {
            let name = el.name();
            out.push('<');
            out.push_str(name);
            out.push('>');
            if is_void_element(name) {
                return;
            }
            for child in node.children() {
                serialize_node(child, skip, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        _ => {}
    }
}

/// Escapes text the way a browser's `innerHTML` getter does.
fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

/// Reverses [`escape_text`] once tags are gone. `&amp;` goes last so
/// `&amp;lt;` decodes to the literal `&lt;` it started as.
fn unescape_text(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
