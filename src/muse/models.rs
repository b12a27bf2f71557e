// Serde types for The Muse jobs API.
//
// Only the fields the trend analysis touches are modeled. Everything else in
// the response body is ignored by serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single job posting, the document unit of the trend corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    /// Job title. Passthrough, not analyzed.
    #[serde(default)]
    pub name: String,
    /// Raw posting body. Usually HTML with entities.
    #[serde(default)]
    pub contents: String,
    #[serde(default)]
    pub locations: Vec<Location>,
    pub publication_date: DateTime<Utc>,
    #[serde(default)]
    pub company: Company,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
}

/// One page of the paginated jobs listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPage {
    #[serde(default)]
    pub results: Vec<Job>,
    /// Total number of pages the API reports for this query.
    pub page_count: u32,
    /// Page index echoed back by the API.
    #[serde(default)]
    pub page: u32,
}
