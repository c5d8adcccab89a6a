// SPDX-License-Identifier: GPL-3.0-or-later

use crate::backoff::BackoffPolicy;
use crate::error::{OdesliError, Result};
use crate::models::LinksResponse;
use reqwest::{Client, StatusCode};
use songlink_domain::ResolvedLink;
use std::time::Duration;
use tracing::{debug, trace, warn};
use url::Url;

const ODESLI_LINKS_URL: &str = "https://api.song.link/v1-alpha.1/links";
const USER_AGENT: &str = concat!("songlink/", env!("CARGO_PKG_VERSION"));

/// Odesli `/links` client with bounded retry on transient statuses.
#[derive(Debug, Clone)]
pub struct OdesliClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    user_country: Option<String>,
    backoff: BackoffPolicy,
}

impl OdesliClient {
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> OdesliClientBuilder {
        OdesliClientBuilder::default()
    }

    pub fn backoff(&self) -> &BackoffPolicy {
        &self.backoff
    }

    /// Resolve a store URL to its share page.
    ///
    /// Returns `Ok(None)` when the service answers without a page URL or when
    /// every attempt hit a transient status. A non-transient error status is
    /// returned immediately as [`OdesliError::ApiError`].
    ///
    /// # Example
    /// ```no_run
    /// # use songlink_odesli::OdesliClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = OdesliClient::new()?;
    /// let link = client
    ///     .resolve("https://music.apple.com/us/album/ok-computer/1097861387")
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn resolve(&self, source_url: &str) -> Result<Option<ResolvedLink>> {
        let url = self.links_url(source_url)?;
        let max_attempts = self.backoff.max_attempts();
        let mut delays = self.backoff.delays();

        for attempt in 1..=max_attempts {
            trace!(target: "resolver", attempt, "GET {}", url);
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            debug!(target: "resolver", attempt, "response status: {}", status);

            if status == StatusCode::OK {
                let body = response.text().await?;
                trace!(target: "resolver", "response body: {}", body);

                let links: LinksResponse = serde_json::from_str(&body).map_err(|e| {
                    OdesliError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;

                debug!(
                    target: "resolver",
                    entity = links.entity_unique_id.as_deref().unwrap_or("-"),
                    has_page = links.page_url().is_some(),
                    "links resolved"
                );
                return Ok(links.page_url().map(ResolvedLink::new));
            }

            if !self.backoff.is_transient(status.as_u16()) {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(OdesliError::ApiError {
                    status: status.as_u16(),
                    message,
                });
            }

            if let Some(delay) = delays.next() {
                warn!(
                    target: "resolver",
                    attempt,
                    max_attempts,
                    status = status.as_u16(),
                    delay_ms = delay.as_millis() as u64,
                    "transient resolver status, backing off"
                );
                tokio::time::sleep(delay).await;
            }
        }

        warn!(
            target: "resolver",
            max_attempts,
            source_url,
            "resolver attempts exhausted"
        );
        Ok(None)
    }

    fn links_url(&self, source_url: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| OdesliError::InvalidBaseUrl(format!("{}: {}", self.base_url, e)))?;

        url.query_pairs_mut().append_pair("url", source_url);
        if let Some(country) = &self.user_country {
            url.query_pairs_mut().append_pair("userCountry", country);
        }
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }

        Ok(url)
    }
}

/// Builder for configuring an Odesli client.
#[derive(Debug)]
pub struct OdesliClientBuilder {
    base_url: String,
    timeout: Duration,
    api_key: Option<String>,
    user_country: Option<String>,
    backoff: BackoffPolicy,
}

impl Default for OdesliClientBuilder {
    fn default() -> Self {
        Self {
            base_url: ODESLI_LINKS_URL.to_string(),
            timeout: Duration::from_secs(20),
            api_key: None,
            user_country: None,
            backoff: BackoffPolicy::default(),
        }
    }
}

impl OdesliClientBuilder {
    /// Set the full `/links` endpoint URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Per-request timeout; retries each get their own.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    pub fn user_country(mut self, country: Option<String>) -> Self {
        self.user_country = country;
        self
    }

    pub fn backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn build(self) -> Result<OdesliClient> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(OdesliClient {
            client,
            base_url: self.base_url,
            api_key: self.api_key,
            user_country: self.user_country,
            backoff: self.backoff,
        })
    }
}
