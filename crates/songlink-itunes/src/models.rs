// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use songlink_domain::CandidateAlbum;

/// `wrapperType` value the search service uses for album-level records.
pub const COLLECTION_WRAPPER: &str = "collection";

/// Search parameters.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// Search term.
    pub term: String,
    /// Maximum number of results.
    pub limit: u32,
    /// Two-letter storefront code; the service defaults to "us" when absent.
    pub country: Option<String>,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            limit: 5,
            country: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn country(mut self, country: Option<String>) -> Self {
        self.country = country;
        self
    }
}

/// Raw search response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    #[serde(rename = "resultCount", default)]
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// Album records that can be resolved, in provider order.
    pub fn into_candidates(self) -> Vec<CandidateAlbum> {
        self.results
            .into_iter()
            .filter(SearchResult::is_collection)
            .filter_map(SearchResult::into_candidate)
            .collect()
    }
}

/// One entry of the `results` array. Every field is optional on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub wrapper_type: Option<String>,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub collection_view_url: Option<String>,
    /// RFC 3339 timestamp, e.g. `1997-05-21T07:00:00Z`.
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub collection_id: Option<u64>,
}

impl SearchResult {
    pub fn is_collection(&self) -> bool {
        self.wrapper_type.as_deref() == Some(COLLECTION_WRAPPER)
    }

    /// `None` when the record has no collection URL.
    pub fn into_candidate(self) -> Option<CandidateAlbum> {
        let release_date = self.release_date.as_deref().and_then(parse_release_date);
        CandidateAlbum::new(
            self.collection_name.unwrap_or_default(),
            self.artist_name.unwrap_or_default(),
            self.collection_view_url.unwrap_or_default(),
        )
        .ok()
        .map(|candidate| {
            candidate
                .with_release_date(release_date)
                .with_collection_id(self.collection_id)
        })
    }
}

fn parse_release_date(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.date_naive())
        .ok()
        .or_else(|| {
            value
                .get(..10)
                .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        })
}
