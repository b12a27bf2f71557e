use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::muse::client::{DEFAULT_API_URL, DEFAULT_TIMEOUT};

/// Default number of pages in flight.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Everything has a
/// default; CLI flags override the stop-word path and concurrency.
#[derive(Debug, Clone)]
pub struct Config {
    /// Jobs listing endpoint (MUSE_API_URL).
    pub api_url: String,
    /// Timeout for each page request (MUSE_HTTP_TIMEOUT_SECS).
    pub http_timeout: Duration,
    /// Stop-word file (MUSE_STOP_WORDS). None uses the built-in English list.
    pub stop_words_path: Option<PathBuf>,
    /// Page worker pool size (MUSE_CONCURRENCY).
    pub concurrency: usize,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_timeout = match lookup("MUSE_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("MUSE_HTTP_TIMEOUT_SECS is not a number: {raw}"))?;
                if secs == 0 {
                    anyhow::bail!("MUSE_HTTP_TIMEOUT_SECS must be at least 1");
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        let concurrency = match lookup("MUSE_CONCURRENCY") {
            Some(raw) => {
                let n: usize = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("MUSE_CONCURRENCY is not a number: {raw}"))?;
                if n == 0 {
                    anyhow::bail!("MUSE_CONCURRENCY must be at least 1");
                }
                n
            }
            None => DEFAULT_CONCURRENCY,
        };

        Ok(Self {
            api_url: lookup("MUSE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            http_timeout,
            stop_words_path: lookup("MUSE_STOP_WORDS")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            concurrency,
        })
    }
}
