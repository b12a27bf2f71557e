// Pipeline tests: the full fetch/ingest/score run against an in-memory
// page source. No network access.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use indicatif::ProgressBar;

use muse_trending::muse::models::{Company, Job, JobPage, Location};
use muse_trending::pipeline::trending::{run, ProcessParams, TrendReport};
use muse_trending::trends::normalizer::Normalizer;
use muse_trending::trends::traits::{PageError, PageQuery, PageSource};

/// Serves canned pages and records every request it sees.
struct FakeSource {
    pages: HashMap<u32, Result<JobPage, PageError>>,
    requests: Mutex<Vec<(u32, PageQuery)>>,
}

impl FakeSource {
    fn new(pages: Vec<(u32, Result<JobPage, PageError>)>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requested_pages(&self) -> Vec<u32> {
        let mut pages: Vec<u32> = self.requests.lock().unwrap().iter().map(|(p, _)| *p).collect();
        pages.sort_unstable();
        pages
    }
}

#[async_trait]
impl PageSource for FakeSource {
    async fn fetch_page(&self, page: u32, query: &PageQuery) -> Result<JobPage, PageError> {
        self.requests.lock().unwrap().push((page, query.clone()));
        // Let other workers interleave
        tokio::task::yield_now().await;
        self.pages.get(&page).cloned().unwrap_or(Err(PageError::Fetch {
            page,
            reason: "connection refused".to_string(),
        }))
    }
}

fn job(id: u64, contents: &str, days_old: i64, location: &str) -> Job {
    Job {
        id,
        name: String::new(),
        contents: contents.to_string(),
        locations: vec![Location {
            name: location.to_string(),
        }],
        publication_date: Utc::now() - TimeDelta::days(days_old),
        company: Company::default(),
        tags: vec![],
    }
}

fn page(index: u32, page_count: u32, jobs: Vec<Job>) -> (u32, Result<JobPage, PageError>) {
    (
        index,
        Ok(JobPage {
            results: jobs,
            page_count,
            page: index,
        }),
    )
}

/// A page with one recent posting about `recent` and two old baseline postings.
fn mixed_page(index: u32, page_count: u32, recent: &str) -> (u32, Result<JobPage, PageError>) {
    let base = u64::from(index) * 10;
    page(
        index,
        page_count,
        vec![
            job(base, &format!("<p>{recent} engineer</p>"), 2, "Remote"),
            job(base + 1, "<p>java engineer</p>", 90, "Remote"),
            job(base + 2, "<p>cobol engineer</p>", 90, "Remote"),
        ],
    )
}

fn normalizer() -> Arc<Normalizer> {
    Arc::new(Normalizer::new(["the".to_string()].into()).unwrap())
}

fn params(num_pages: u32, concurrency: usize) -> ProcessParams {
    ProcessParams {
        start_page: 0,
        num_pages,
        flexible: true,
        location: None,
        window_days: 30,
        concurrency,
    }
}

async fn run_against(source: &FakeSource, params: &ProcessParams) -> TrendReport {
    run(source, normalizer(), params, &ProgressBar::hidden())
        .await
        .unwrap()
}

#[tokio::test]
async fn ingests_all_pages_and_ranks_recent_terms() {
    let source = FakeSource::new(vec![
        mixed_page(0, 3, "rust"),
        mixed_page(1, 3, "rust"),
        mixed_page(2, 3, "kotlin"),
        mixed_page(3, 3, "rust"),
    ]);

    let report = run_against(&source, &params(4, 4)).await;

    assert!(report.errors.is_empty(), "{:?}", report.errors);
    assert_eq!(report.pages_ingested, 4);
    assert_eq!(report.target_docs, 4);
    assert_eq!(report.control_docs, 8);

    let terms: Vec<&str> = report.terms.iter().map(|t| t.term.as_str()).collect();
    assert_eq!(terms.len(), 3, "only target terms are ranked: {terms:?}");
    // Never seen in control, so both get the maximum idf; rust is more frequent
    assert_eq!(terms[0], "rust");
    assert_eq!(terms[1], "kotlin");
    // Present in every control posting
    assert_eq!(terms[2], "engineer");
    assert!(report.terms[2].score < 0.0);
}

#[tokio::test]
async fn failed_pages_are_recorded_and_skipped() {
    let source = FakeSource::new(vec![
        mixed_page(0, 5, "rust"),
        (
            1,
            Err(PageError::Decode {
                page: 1,
                reason: "expected value at line 1 column 1".to_string(),
            }),
        ),
        mixed_page(2, 5, "rust"),
        // page 3 missing -> fetch error
        mixed_page(4, 5, "rust"),
    ]);

    let report = run_against(&source, &params(5, 2)).await;

    assert_eq!(report.pages_ingested, 3);
    assert_eq!(report.errors.len(), 2);
    assert!(matches!(report.errors[0], PageError::Decode { page: 1, .. }));
    assert!(matches!(report.errors[1], PageError::Fetch { page: 3, .. }));
    assert_eq!(report.terms[0].term, "rust");
}

#[tokio::test]
async fn no_pages_yields_empty_ranking_and_errors() {
    let source = FakeSource::new(vec![]);

    let report = run_against(&source, &params(3, 8)).await;

    assert!(report.terms.is_empty());
    assert_eq!(report.errors.len(), 3);
    assert_eq!(report.pages_ingested, 0);
    assert_eq!(source.requested_pages(), vec![0, 1, 2]);
}

#[tokio::test]
async fn stops_at_page_count_hint() {
    let source = FakeSource::new(vec![
        mixed_page(0, 2, "rust"),
        mixed_page(1, 2, "rust"),
        mixed_page(2, 2, "rust"),
    ]);

    let report = run_against(&source, &params(10, 4)).await;

    assert_eq!(source.requested_pages(), vec![0, 1, 2]);
    assert_eq!(report.pages_ingested, 3);
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn page_beyond_its_own_hint_is_dropped() {
    // Probe fails, so every page is requested; page 2 says there is only 1
    let source = FakeSource::new(vec![mixed_page(1, 1, "rust"), mixed_page(2, 1, "kotlin")]);

    let report = run_against(&source, &params(3, 2)).await;

    assert_eq!(report.pages_ingested, 1);
    assert_eq!(report.errors.len(), 1, "only the probe failed");
    assert!(report.terms.iter().all(|t| t.term != "kotlin"));
}

#[tokio::test]
async fn starts_at_requested_page() {
    let source = FakeSource::new(vec![
        mixed_page(0, 9, "cobol"),
        mixed_page(5, 9, "rust"),
        mixed_page(6, 9, "rust"),
    ]);

    let mut p = params(2, 2);
    p.start_page = 5;
    let report = run_against(&source, &p).await;

    assert_eq!(source.requested_pages(), vec![5, 6]);
    assert_eq!(report.pages_ingested, 2);
}

#[tokio::test]
async fn zero_pages_requests_nothing() {
    let source = FakeSource::new(vec![mixed_page(0, 1, "rust")]);

    let report = run_against(&source, &params(0, 2)).await;

    assert!(source.requested_pages().is_empty());
    assert!(report.terms.is_empty());
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn query_and_location_filter_pass_through() {
    let source = FakeSource::new(vec![page(
        0,
        1,
        vec![
            job(1, "rust backend", 1, "Boston, MA"),
            job(2, "kotlin android", 1, "Chicago, IL"),
        ],
    )]);

    let mut p = params(1, 1);
    p.flexible = false;
    p.location = Some("Boston, MA".to_string());
    let report = run_against(&source, &p).await;

    let requests = source.requests.lock().unwrap().clone();
    assert_eq!(
        requests[0].1,
        PageQuery {
            flexible: false,
            location: Some("Boston, MA".to_string()),
        }
    );

    // The Chicago posting is recent but fails the filter, so it is baseline
    assert_eq!(report.target_docs, 1);
    assert_eq!(report.control_docs, 1);
    let terms: Vec<&str> = report.terms.iter().map(|t| t.term.as_str()).collect();
    assert!(terms.contains(&"rust"));
    assert!(!terms.contains(&"kotlin"));
}

#[tokio::test]
async fn concurrency_does_not_change_the_result() {
    let pages: Vec<_> = (0..12)
        .map(|i| mixed_page(i, 11, if i % 3 == 0 { "rust" } else { "go" }))
        .collect();

    let serial = run_against(&FakeSource::new(pages.clone()), &params(12, 1)).await;
    let parallel = run_against(&FakeSource::new(pages), &params(12, 8)).await;

    assert_eq!(serial.terms, parallel.terms);
    assert_eq!(serial.control_docs, parallel.control_docs);
    assert_eq!(serial.target_docs, parallel.target_docs);
}
