// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{ItunesError, Result};
use crate::models::{SearchQuery, SearchResponse};
use reqwest::Client;
use songlink_domain::CandidateAlbum;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

const ITUNES_SEARCH_URL: &str = "https://itunes.apple.com/search";
const USER_AGENT: &str = concat!("songlink/", env!("CARGO_PKG_VERSION"));

/// iTunes Search API client.
#[derive(Debug, Clone)]
pub struct ItunesClient {
    client: Client,
    base_url: String,
    country: Option<String>,
}

impl ItunesClient {
    /// Create a new client with default settings.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder() -> ItunesClientBuilder {
        ItunesClientBuilder::default()
    }

    /// Search for albums matching a term and return the candidates the
    /// service reported, in its own order.
    ///
    /// # Example
    /// ```no_run
    /// # use songlink_itunes::ItunesClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = ItunesClient::new()?;
    /// let candidates = client.search_candidates("Radiohead OK Computer", 5).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_candidates(&self, term: &str, limit: u32) -> Result<Vec<CandidateAlbum>> {
        let query = SearchQuery::new(term)
            .limit(limit)
            .country(self.country.clone());
        let response = self.search_albums(&query).await?;
        let reported = response.results.len();
        let candidates = response.into_candidates();

        debug!(
            target: "catalog",
            term,
            reported,
            candidates = candidates.len(),
            "catalog search complete"
        );

        Ok(candidates)
    }

    /// Run an album search and return the raw response.
    pub async fn search_albums(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ItunesError::InvalidBaseUrl(format!("{}: {}", self.base_url, e)))?;

        url.query_pairs_mut()
            .append_pair("term", &query.term)
            .append_pair("entity", "album")
            .append_pair("limit", &query.limit.to_string())
            .append_pair("media", "music");

        if let Some(country) = &query.country {
            url.query_pairs_mut().append_pair("country", country);
        }

        self.get(url).await
    }

    async fn get(&self, url: Url) -> Result<SearchResponse> {
        trace!(target: "catalog", "GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        debug!(target: "catalog", "response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ItunesError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        trace!(target: "catalog", "response body: {}", body);

        serde_json::from_str(&body).map_err(|e| {
            ItunesError::InvalidResponse(format!("Failed to parse response: {}", e))
        })
    }
}

/// Builder for configuring an iTunes client.
#[derive(Debug)]
pub struct ItunesClientBuilder {
    base_url: String,
    timeout: Duration,
    country: Option<String>,
}

impl Default for ItunesClientBuilder {
    fn default() -> Self {
        Self {
            base_url: ITUNES_SEARCH_URL.to_string(),
            timeout: Duration::from_secs(15),
            country: None,
        }
    }
}

impl ItunesClientBuilder {
    /// Set the full search endpoint URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Restrict searches to one storefront.
    pub fn country(mut self, country: Option<String>) -> Self {
        self.country = country;
        self
    }

    /// Build the iTunes client.
    pub fn build(self) -> Result<ItunesClient> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(ItunesClient {
            client,
            base_url: self.base_url,
            country: self.country,
        })
    }
}
