// ABOUTME: Loads the page snapshot to scrape from a file, stdin, or by fetching the address.
// ABOUTME: Decodes fetched pages by their declared charset and saved snapshots by detection.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

/// Reads the HTML for `address`.
///
/// `html` of `-` reads stdin, any other path reads that file, and `None`
/// fetches the address itself.
pub fn load_snapshot(http: &Client, address: &str, html: Option<&Path>) -> Result<String> {
    match html {
        Some(path) if path.as_os_str() == "-" => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("reading page from stdin")?;
            Ok(decode_page(&buf, None))
        }
        Some(path) => {
            let bytes =
                fs::read(path).with_context(|| format!("reading page from {}", path.display()))?;
            Ok(decode_page(&bytes, None))
        }
        None => fetch(http, address),
    }
}

fn fetch(http: &Client, address: &str) -> Result<String> {
    let resp = http
        .get(address)
        .send()
        .with_context(|| format!("fetching {}", address))?
        .error_for_status()
        .with_context(|| format!("fetching {}", address))?;
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = resp.bytes().with_context(|| format!("reading body of {}", address))?;
    debug!(address, len = bytes.len(), content_type = ?content_type, "page fetched");
    Ok(decode_page(&bytes, content_type.as_deref()))
}

/// Turns raw page bytes into text.
///
/// Fetched pages carry a `content-type` header whose charset wins when
/// `encoding_rs` knows the label. Saved snapshots and stdin have no header,
/// so their encoding is guessed by `chardetng`.
fn decode_page(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(declared_charset)
        .and_then(|label| encoding_rs::Encoding::for_label(label.as_bytes()))
        .unwrap_or_else(|| {
            let mut detector = chardetng::EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        });
    encoding.decode(bytes).0.into_owned()
}

/// The `charset` parameter of a content-type header, lower-cased and unquoted.
fn declared_charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_ascii_lowercase())
    })
}
