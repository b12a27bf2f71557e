// Page source trait, the seam between the trend engine and the jobs API.
//
// The orchestrator only ever asks for "page N of this query". The default
// implementation is the Muse HTTP client; tests plug in an in-memory source.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::muse::models::JobPage;

/// Query parameters forwarded to the page source untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// Include jobs with a flexible/remote location.
    pub flexible: bool,
    /// Restrict the listing to a location (also used for target filtering).
    pub location: Option<String>,
}

/// A non-fatal, page-level failure. The page is skipped and the run continues.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageError {
    /// Transport failure or non-success HTTP status.
    #[error("failed to fetch page {page}: {reason}")]
    Fetch { page: u32, reason: String },

    /// The response body could not be decoded into a page.
    #[error("failed to decode page {page}: {reason}")]
    Decode { page: u32, reason: String },

    /// The worker ingesting the page did not finish.
    #[error("failed to ingest page {page}: {reason}")]
    Ingest { page: u32, reason: String },
}

impl PageError {
    /// Index of the page this error belongs to.
    pub fn page(&self) -> u32 {
        match self {
            PageError::Fetch { page, .. }
            | PageError::Decode { page, .. }
            | PageError::Ingest { page, .. } => *page,
        }
    }
}

/// Anything that can hand out pages of job postings.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch a single page. No retries.
    async fn fetch_page(&self, page: u32, query: &PageQuery) -> Result<JobPage, PageError>;
}
