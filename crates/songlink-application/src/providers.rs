// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Result;
use songlink_domain::{CandidateAlbum, Query, ResolvedLink};
use songlink_itunes::ItunesClient;
use songlink_odesli::OdesliClient;

// ============================================================================
// Provider Ports
// ============================================================================

/// Album catalog used to turn a query into candidates.
#[async_trait::async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Candidates in the provider's own order, at most `limit` of them.
    async fn search(&self, query: &Query, limit: u32) -> Result<Vec<CandidateAlbum>>;
}

/// Service that maps a store URL to a cross-platform share link.
#[async_trait::async_trait]
pub trait LinkResolution: Send + Sync {
    /// `Ok(None)` when the service has no share page for the URL.
    async fn resolve(&self, source_url: &str) -> Result<Option<ResolvedLink>>;
}

#[async_trait::async_trait]
impl CatalogSearch for ItunesClient {
    async fn search(&self, query: &Query, limit: u32) -> Result<Vec<CandidateAlbum>> {
        Ok(self.search_candidates(&query.search_term(), limit).await?)
    }
}

#[async_trait::async_trait]
impl LinkResolution for OdesliClient {
    async fn resolve(&self, source_url: &str) -> Result<Option<ResolvedLink>> {
        Ok(OdesliClient::resolve(self, source_url).await?)
    }
}
