// ABOUTME: CLI for scraping a job posting or profile page and forwarding the record to a webhook.
// ABOUTME: Reads a saved snapshot or fetches the address, prints the record as JSON.

mod page;
mod webhook;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use jobhook_scrape::{Client, SiteRegistry};
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::webhook::{deliver, Webhooks};

/// Scrape a supported page and print (and optionally forward) the record.
#[derive(Parser, Debug)]
#[command(name = "jobhook")]
#[command(about = "Scrape job postings and profiles into JSON and forward them to webhooks")]
struct Args {
    /// Address of the page; selects the site table and becomes the record's link
    #[arg(long = "url")]
    url: String,

    /// Saved HTML snapshot of the page ("-" reads stdin). Fetches the address when omitted
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Site registry JSON file replacing the builtin table
    #[arg(long = "registry")]
    registry: Option<PathBuf>,

    /// Webhook receiving job records
    #[arg(long = "job-webhook", env = "JOBHOOK_JOB_WEBHOOK")]
    job_webhook: Option<Url>,

    /// Webhook receiving profile records
    #[arg(long = "profile-webhook", env = "JOBHOOK_PROFILE_WEBHOOK")]
    profile_webhook: Option<Url>,

    /// HTTP timeout in seconds for fetching and delivery
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// Output compact JSON instead of pretty
    #[arg(long = "compact")]
    compact: bool,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(registry: Option<&PathBuf>) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(path) = registry {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading registry {}", path.display()))?;
        builder = builder.registry(SiteRegistry::from_json(&json)?);
    }
    Ok(builder.build())
}

fn run(args: &Args) -> Result<()> {
    let client = build_client(args.registry.as_ref())?;

    // Unsupported pages stop here, before any fetch.
    client.classify(&args.url)?;

    let http = reqwest::blocking::Client::builder()
        .user_agent(concat!("jobhook/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(args.timeout))
        .build()
        .context("building HTTP client")?;

    let html = page::load_snapshot(&http, &args.url, args.html.as_deref())?;
    let record = client.scrape_html(&args.url, &html)?;

    let output = if args.compact {
        serde_json::to_string(&record)?
    } else {
        serde_json::to_string_pretty(&record)?
    };
    println!("{}", output);

    let hooks = Webhooks {
        job: args.job_webhook.clone(),
        profile: args.profile_webhook.clone(),
    };
    match hooks.for_kind(record.kind) {
        Some(endpoint) => {
            deliver(&http, endpoint, &record)?;
        }
        None => tracing::info!(kind = %record.kind, "no webhook configured, skipping delivery"),
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let start = Instant::now();
    let result = run(&args);

    if args.timing {
        eprintln!("elapsed: {}ms", start.elapsed().as_millis());
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
