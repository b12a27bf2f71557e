// Trending-terms pipeline: fetch pages -> classify/normalize/ingest -> score.
//
// The first page is requested on its own to learn the page-count hint. The
// remaining pages go through a bounded pool of workers: each worker fetches
// its page, then hands the CPU-bound ingestion to the blocking thread pool
// so pages are tokenized in parallel. Scoring runs exactly once, after
// every worker has been joined.
//
// Page failures never abort the run. They are collected and returned next
// to the ranking.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::muse::models::{Job, JobPage};
use crate::trends::classifier;
use crate::trends::corpus::Corpus;
use crate::trends::normalizer::Normalizer;
use crate::trends::scoring::{self, TrendingTerm};
use crate::trends::traits::{PageError, PageQuery, PageSource};

/// Parameters of a single trend run.
#[derive(Debug, Clone)]
pub struct ProcessParams {
    /// First page index to request.
    pub start_page: u32,
    /// Maximum number of pages to request.
    pub num_pages: u32,
    /// Passed through to the page source.
    pub flexible: bool,
    /// Listing filter and target-corpus location filter.
    pub location: Option<String>,
    /// Lookback window in days for the target corpus.
    pub window_days: u32,
    /// Maximum number of pages in flight.
    pub concurrency: usize,
}

impl Default for ProcessParams {
    fn default() -> Self {
        Self {
            start_page: 0,
            num_pages: 10,
            flexible: true,
            location: None,
            window_days: 30,
            concurrency: 8,
        }
    }
}

impl ProcessParams {
    pub fn query(&self) -> PageQuery {
        PageQuery {
            flexible: self.flexible,
            location: self.location.clone(),
        }
    }
}

/// Document counts from one ingested page.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PageStats {
    pub target_docs: usize,
    pub control_docs: usize,
}

/// Everything a trend run produces.
#[derive(Debug, Default, Serialize)]
pub struct TrendReport {
    /// All scored terms, highest first.
    pub terms: Vec<TrendingTerm>,
    /// Pages that were skipped, with the reason.
    pub errors: Vec<PageError>,
    pub pages_ingested: usize,
    pub target_docs: usize,
    pub control_docs: usize,
}

/// Classify, normalize and ingest every job of a page into `corpus`.
pub fn ingest_jobs(
    corpus: &Corpus,
    normalizer: &Normalizer,
    jobs: &[Job],
    window_days: u32,
    location: Option<&str>,
    now: DateTime<Utc>,
) -> Result<PageStats> {
    let mut stats = PageStats::default();
    for job in jobs {
        let target = classifier::is_target_at(job, window_days, location, now);
        let terms = normalizer.normalize(&job.contents);
        corpus.ingest(target, &terms)?;

        if target {
            stats.target_docs += 1;
        } else {
            stats.control_docs += 1;
        }
    }
    Ok(stats)
}

/// Shared state handed to every page worker.
struct PageWorker {
    corpus: Arc<Corpus>,
    normalizer: Arc<Normalizer>,
    window_days: u32,
    location: Option<String>,
    now: DateTime<Utc>,
}

impl PageWorker {
    /// Ingest a fetched page on the blocking pool. `Ok(None)` when the page
    /// lies beyond the API's own page count.
    async fn ingest(&self, index: u32, page: JobPage) -> Result<Option<PageStats>, PageError> {
        if index > page.page_count {
            debug!(
                page = index,
                page_count = page.page_count,
                "Page beyond reported page count, skipping"
            );
            return Ok(None);
        }

        let corpus = Arc::clone(&self.corpus);
        let normalizer = Arc::clone(&self.normalizer);
        let location = self.location.clone();
        let window_days = self.window_days;
        let now = self.now;

        let stats = tokio::task::spawn_blocking(move || {
            ingest_jobs(
                &corpus,
                &normalizer,
                &page.results,
                window_days,
                location.as_deref(),
                now,
            )
        })
        .await
        .map_err(|e| PageError::Ingest {
            page: index,
            reason: format!("worker did not complete: {e}"),
        })?
        .map_err(|e| PageError::Ingest {
            page: index,
            reason: e.to_string(),
        })?;

        debug!(
            page = index,
            target = stats.target_docs,
            control = stats.control_docs,
            "Ingested page"
        );

        Ok(Some(stats))
    }
}

/// Run a full trend analysis against `source`.
///
/// `progress` is advanced once per requested page; pass
/// `ProgressBar::hidden()` when no display is wanted.
pub async fn run(
    source: &dyn PageSource,
    normalizer: Arc<Normalizer>,
    params: &ProcessParams,
    progress: &ProgressBar,
) -> Result<TrendReport> {
    let mut report = TrendReport::default();
    if params.num_pages == 0 {
        return Ok(report);
    }

    let corpus = Arc::new(Corpus::new());
    let query = params.query();
    let worker = PageWorker {
        corpus: Arc::clone(&corpus),
        normalizer,
        window_days: params.window_days,
        location: params.location.clone().filter(|l| !l.is_empty()),
        now: Utc::now(),
    };

    let first = params.start_page;
    let end = first.saturating_add(params.num_pages);
    progress.set_length(u64::from(end - first));

    info!(
        start_page = first,
        num_pages = params.num_pages,
        concurrency = params.concurrency,
        "Fetching job pages"
    );

    let mut outcomes: Vec<Result<Option<PageStats>, PageError>> = Vec::new();

    // Probe the first page for the page-count hint
    let mut page_count_hint = None;
    let probe = match source.fetch_page(first, &query).await {
        Ok(page) => {
            page_count_hint = Some(page.page_count);
            worker.ingest(first, page).await
        }
        Err(e) => Err(e),
    };
    outcomes.push(probe);
    progress.inc(1);

    let remaining: Vec<u32> = (first.saturating_add(1)..end)
        .take_while(|&index| page_count_hint.map_or(true, |hint| index <= hint))
        .collect();
    progress.set_length(remaining.len() as u64 + 1);

    let worker = &worker;
    let query = &query;
    let joined: Vec<Result<Option<PageStats>, PageError>> =
        stream::iter(remaining.into_iter().map(|index| async move {
            let outcome = match source.fetch_page(index, query).await {
                Ok(page) => worker.ingest(index, page).await,
                Err(e) => Err(e),
            };
            progress.inc(1);
            outcome
        }))
        .buffer_unordered(params.concurrency.max(1))
        .collect()
        .await;
    outcomes.extend(joined);

    for outcome in outcomes {
        match outcome {
            Ok(Some(stats)) => {
                report.pages_ingested += 1;
                report.target_docs += stats.target_docs;
                report.control_docs += stats.control_docs;
            }
            Ok(None) => {}
            Err(e) => {
                warn!(page = e.page(), error = %e, "Skipping page");
                report.errors.push(e);
            }
        }
    }
    report.errors.sort_by_key(PageError::page);

    info!(
        pages = report.pages_ingested,
        errors = report.errors.len(),
        target_docs = report.target_docs,
        control_docs = report.control_docs,
        "All page workers joined"
    );

    let scores = corpus.score()?;
    report.terms = scoring::rank(scores);

    info!(terms = report.terms.len(), "Scored trending terms");

    Ok(report)
}
