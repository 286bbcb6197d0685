// ABOUTME: Forwards scraped records to the webhook configured for their content kind.
// ABOUTME: One POST per record, JSON body, non-2xx responses are errors; no retry.

use anyhow::{bail, Context, Result};
use jobhook_scrape::{ContentKind, ScrapedRecord};
use reqwest::blocking::Client;
use tracing::info;
use url::Url;

/// Webhook endpoints, one per content kind.
#[derive(Debug, Clone, Default)]
pub struct Webhooks {
    pub job: Option<Url>,
    pub profile: Option<Url>,
}

impl Webhooks {
    /// The endpoint records of `kind` go to, if one is configured.
    pub fn for_kind(&self, kind: ContentKind) -> Option<&Url> {
        match kind {
            ContentKind::Job => self.job.as_ref(),
            ContentKind::Profile => self.profile.as_ref(),
        }
    }
}

/// POSTs `record` as JSON to `endpoint`. Any non-2xx status is an error.
pub fn deliver(http: &Client, endpoint: &Url, record: &ScrapedRecord) -> Result<()> {
    let resp = http
        .post(endpoint.clone())
        .json(record)
        .send()
        .with_context(|| format!("posting to webhook {}", endpoint))?;

    let status = resp.status();
    if !status.is_success() {
        bail!("webhook {} responded with {}", endpoint, status);
    }
    info!(%endpoint, status = status.as_u16(), kind = %record.kind, "record delivered");
    Ok(())
}
