// SPDX-License-Identifier: GPL-3.0-or-later

//! Query → share link orchestration.
//!
//! The pipeline runs `CacheLookup → Searching → Selecting → Resolving →
//! Cached`. A cache hit short-circuits everything after the lookup. Each
//! stage is also exposed on its own and reports a tagged outcome so callers
//! and tests can drive the steps individually.

use crate::normalize::normalize;
use crate::providers::{CatalogSearch, LinkResolution};
use crate::scoring::{select, SelectionMode};
use songlink_domain::{CandidateAlbum, Query, ResolvedLink};
use songlink_infrastructure::{fingerprint, ResolutionCache};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_SEARCH_LIMIT: u32 = 5;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("no candidate could be selected")]
    SelectionFailed,

    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(ResolvedLink),
    Miss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<CandidateAlbum>),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Selected(CandidateAlbum),
    NoCandidate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedLink),
    Unresolvable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
    Cache,
    Fresh,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub link: ResolvedLink,
    pub source: LinkSource,
    /// The candidate that was resolved; `None` for cache hits.
    pub candidate: Option<CandidateAlbum>,
}

/// Cache key for a query, built from its normalized fields.
pub fn query_fingerprint(query: &Query) -> anyhow::Result<String> {
    let artist = query.artist().map(normalize);
    let album = query.album().map(normalize);
    let text = query.text().map(normalize);
    fingerprint(artist.as_deref(), album.as_deref(), text.as_deref())
}

pub struct Pipeline {
    catalog: Arc<dyn CatalogSearch>,
    resolver: Arc<dyn LinkResolution>,
    cache: Arc<dyn ResolutionCache>,
    search_limit: u32,
    mode: SelectionMode,
}

impl Pipeline {
    pub fn new(
        catalog: Arc<dyn CatalogSearch>,
        resolver: Arc<dyn LinkResolution>,
        cache: Arc<dyn ResolutionCache>,
    ) -> Self {
        Self {
            catalog,
            resolver,
            cache,
            search_limit: DEFAULT_SEARCH_LIMIT,
            mode: SelectionMode::default(),
        }
    }

    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn lookup(&self, fingerprint: &str) -> CacheLookup {
        match self.cache.get(fingerprint) {
            Some(link) => CacheLookup::Hit(link),
            None => CacheLookup::Miss,
        }
    }

    pub async fn search(&self, query: &Query) -> PipelineResult<SearchOutcome> {
        let candidates = self.catalog.search(query, self.search_limit).await?;
        debug!(target: "pipeline", candidates = candidates.len(), "search finished");

        if candidates.is_empty() {
            Ok(SearchOutcome::Empty)
        } else {
            Ok(SearchOutcome::Found(candidates))
        }
    }

    pub fn select(&self, candidates: Vec<CandidateAlbum>, query: &Query) -> Selection {
        match select(candidates, query.artist(), query.album(), self.mode) {
            Some(candidate) => Selection::Selected(candidate),
            None => Selection::NoCandidate,
        }
    }

    pub async fn resolve(&self, candidate: &CandidateAlbum) -> PipelineResult<Resolution> {
        match self.resolver.resolve(candidate.source_url()).await? {
            Some(link) => Ok(Resolution::Resolved(link)),
            None => Ok(Resolution::Unresolvable),
        }
    }

    /// Run every stage for `query`. Only fresh, fully resolved links are
    /// written to the cache.
    pub async fn run(&self, query: &Query) -> PipelineResult<PipelineOutcome> {
        let key = query_fingerprint(query)?;

        if let CacheLookup::Hit(link) = self.lookup(&key) {
            info!(target: "pipeline", query = %query.label(), "cache hit");
            return Ok(PipelineOutcome {
                link,
                source: LinkSource::Cache,
                candidate: None,
            });
        }
        debug!(target: "pipeline", query = %query.label(), "cache miss");

        let candidates = match self.search(query).await? {
            SearchOutcome::Found(candidates) => candidates,
            SearchOutcome::Empty => {
                return Err(PipelineError::NotFound(format!(
                    "no albums matched \"{}\"",
                    query.label()
                )))
            }
        };

        let candidate = match self.select(candidates, query) {
            Selection::Selected(candidate) => candidate,
            Selection::NoCandidate => return Err(PipelineError::SelectionFailed),
        };
        info!(
            target: "pipeline",
            title = candidate.title(),
            artist = candidate.artist(),
            release_date = %candidate
                .release_date()
                .map(|date| date.to_string())
                .unwrap_or_default(),
            source_url = candidate.source_url(),
            "resolving candidate"
        );

        let link = match self.resolve(&candidate).await? {
            Resolution::Resolved(link) => link,
            Resolution::Unresolvable => {
                return Err(PipelineError::NotFound(format!(
                    "no share link for {}",
                    candidate.source_url()
                )))
            }
        };

        self.cache.put(&key, &link);
        Ok(PipelineOutcome {
            link,
            source: LinkSource::Fresh,
            candidate: Some(candidate),
        })
    }
}
