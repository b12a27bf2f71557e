// HTTP client for The Muse public jobs API.
//
// Each page is a single GET with its own timeout. Transport failures and
// non-success statuses become `PageError::Fetch`; bodies that don't parse
// become `PageError::Decode`. Nothing is retried.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Url;
use tracing::debug;

use super::models::JobPage;
use crate::trends::traits::{PageError, PageQuery, PageSource};

/// Default jobs listing endpoint.
pub const DEFAULT_API_URL: &str = "https://api-v2.themuse.com/jobs";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Thin reqwest wrapper around the jobs listing endpoint.
pub struct MuseClient {
    client: reqwest::Client,
    api_url: Url,
}

impl MuseClient {
    /// Create a client for the given endpoint. `timeout` applies to every
    /// individual page request.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let api_url =
            Url::parse(api_url).with_context(|| format!("Invalid jobs API URL: {api_url}"))?;

        let client = reqwest::Client::builder()
            .user_agent("muse-trending/0.1")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, api_url })
    }

    /// Build the request URL for one page of a query.
    pub fn build_url(&self, page: u32, query: &PageQuery) -> Url {
        let mut url = self.api_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            pairs.append_pair("flexible", if query.flexible { "true" } else { "false" });
            if let Some(location) = query.location.as_deref().filter(|l| !l.is_empty()) {
                pairs.append_pair("location", location);
            }
        }
        url
    }
}

#[async_trait]
impl PageSource for MuseClient {
    async fn fetch_page(&self, page: u32, query: &PageQuery) -> Result<JobPage, PageError> {
        let url = self.build_url(page, query);
        debug!(page = page, url = %url, "Requesting jobs page");

        let fetch_err = |reason: String| PageError::Fetch { page, reason };

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(fetch_err(format!("HTTP {status}: {body}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| fetch_err(format!("failed to read body: {e}")))?;

        serde_json::from_str::<JobPage>(&body).map_err(|e| PageError::Decode {
            page,
            reason: e.to_string(),
        })
    }
}
