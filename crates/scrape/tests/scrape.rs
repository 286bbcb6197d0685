// ABOUTME: End-to-end scrape tests against saved job and profile page snapshots.
// ABOUTME: Covers record assembly, list filtering, title fallback, idempotence and unsupported sites.

use jobhook_scrape::{Client, ContentKind, FieldValue, ListItem, Page};
use pretty_assertions::assert_eq;

const LINKEDIN_JOB: &str = include_str!("fixtures/linkedin_job.html");
const LINKEDIN_PROFILE: &str = include_str!("fixtures/linkedin_profile.html");

#[test]
fn linkedin_job_end_to_end() {
    let address = "https://www.linkedin.com/jobs/view/123";
    let record = Client::default().scrape_html(address, LINKEDIN_JOB).unwrap();

    assert_eq!(record.kind, ContentKind::Job);
    assert_eq!(record.site.as_str(), "linkedin.com");
    assert_eq!(record.text("role"), Some("Senior Rust Engineer"));
    assert_eq!(record.text("company"), Some("Ferrous Systems"));
    assert_eq!(
        record.text("description"),
        Some(
            "About the job\n\
             We build compilers and tooling.\n\
             Remote friendly.\n\
             Berlin office optional.\n\
             Rust\n\
             LLVM"
        )
    );
    assert_eq!(record.link, address);
    assert!(record.scraped_at.is_none());

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["link"], address);
    assert!(json.get("scrapedAt").is_none());
}

#[test]
fn job_title_falls_back_to_h1() {
    let html = r#"<html><body>
        <h1 class="top-card-layout__title"> Senior Engineer </h1>
        <div class="jobs-unified-top-card__company-name">Acme</div>
    </body></html>"#;
    let record = Client::default()
        .scrape_html("https://www.linkedin.com/jobs/view/9", html)
        .unwrap();
    assert_eq!(record.text("role"), Some("Senior Engineer"));
    assert_eq!(record.text("company"), Some("Acme"));
    assert_eq!(record.text("description"), Some(""));
}

#[test]
fn linkedin_profile_end_to_end() {
    let address = "https://www.linkedin.com/in/jane-doe/";
    let record = Client::default()
        .scrape_html(address, LINKEDIN_PROFILE)
        .unwrap();

    assert_eq!(record.kind, ContentKind::Profile);
    assert_eq!(record.text("name"), Some("Jane Doe"));
    assert_eq!(record.text("headline"), Some("Staff Engineer at Acme"));
    assert_eq!(record.text("location"), Some("Berlin, Germany"));
    assert_eq!(
        record.text("about"),
        Some("I build distributed systems.\nAlso bread.")
    );

    let experience = record.list("experience").unwrap();
    assert_eq!(experience.len(), 2);
    assert_eq!(experience[0].get("title"), Some("Staff Engineer"));
    assert_eq!(experience[0].get("company"), Some("Acme"));
    assert_eq!(experience[0].get("duration"), Some("2020 - Present"));
    assert_eq!(experience[1].get("company"), Some("Initech"));

    let education = record.list("education").unwrap();
    assert_eq!(
        education,
        &[
            ListItem::Record(vec![
                ("school".to_string(), "TU Berlin".to_string()),
                ("degree".to_string(), "MSc Computer Science".to_string()),
                ("duration".to_string(), "2014 - 2016".to_string()),
            ]),
            ListItem::Record(vec![
                ("school".to_string(), "Open University".to_string()),
                ("degree".to_string(), String::new()),
                ("duration".to_string(), String::new()),
            ]),
        ][..]
    );

    assert_eq!(
        record.get("skills"),
        Some(&FieldValue::List(vec![
            ListItem::Text("Rust".to_string()),
            ListItem::Text("Distributed Systems".to_string()),
        ]))
    );

    assert_eq!(record.link, address);
    let json = serde_json::to_value(&record).unwrap();
    assert!(json["scrapedAt"].as_str().unwrap().ends_with('Z'));
    assert_eq!(json["skills"][1], "Distributed Systems");
    assert_eq!(json["education"][1]["school"], "Open University");
}

#[test]
fn scraping_twice_yields_identical_records() {
    let client = Client::default();
    let page = Page::parse(LINKEDIN_PROFILE);
    let address = "https://www.linkedin.com/in/jane-doe";

    let mut first = client.scrape(address, &page.root()).unwrap();
    let mut second = client.scrape(address, &page.root()).unwrap();
    first.scraped_at = None;
    second.scraped_at = None;
    assert_eq!(first, second);
}

#[test]
fn unsupported_site_aborts_the_scrape() {
    let err = Client::default()
        .scrape_html("https://careers.example.com/jobs/1", LINKEDIN_JOB)
        .unwrap_err();
    assert!(err.is_unsupported_site());
    assert_eq!(err.to_string(), "This website is not supported");
}

#[test]
fn indeed_and_ziprecruiter_snapshots() {
    let indeed = r#"<html><body>
        <h1 class="jobsearch-JobInfoHeader-title">Line Cook</h1>
        <div class="jobsearch-InlineCompanyRating"><div>Diner Co</div><div>4.1</div></div>
        <div id="jobDescriptionText"><p>Prep.</p><p>Cook.</p></div>
    </body></html>"#;
    let record = Client::default()
        .scrape_html("https://www.indeed.com/viewjob?jk=abc", indeed)
        .unwrap();
    assert_eq!(record.text("role"), Some("Line Cook"));
    assert_eq!(record.text("company"), Some("Diner Co"));
    assert_eq!(record.text("description"), Some("Prep.\nCook."));

    let zip = r#"<html><body>
        <h1 class="job_title">Barista</h1>
        <a class="hiring_company_text">Bean There</a>
        <div class="text-sm whitespace-pre-line break-words">Pull shots.<br>Smile.</div>
    </body></html>"#;
    let record = Client::default()
        .scrape_html("https://www.ziprecruiter.com/c/Bean/Job/Barista", zip)
        .unwrap();
    assert_eq!(record.text("role"), Some("Barista"));
    assert_eq!(record.text("company"), Some("Bean There"));
    assert_eq!(record.text("description"), Some("Pull shots.\nSmile."));
}
