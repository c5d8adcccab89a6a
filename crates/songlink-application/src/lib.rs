// SPDX-License-Identifier: GPL-3.0-or-later
pub mod normalize;
pub mod pipeline;
pub mod providers;
pub mod scoring;
pub mod template;

pub use normalize::{detect_edition_marker, normalize, strip_edition_suffix};
pub use pipeline::{
    query_fingerprint, CacheLookup, LinkSource, Pipeline, PipelineError, PipelineOutcome,
    PipelineResult, Resolution, SearchOutcome, Selection,
};
pub use providers::{CatalogSearch, LinkResolution};
pub use scoring::{rank_candidates, score, select, ScoredCandidate, SelectionMode};
pub use template::{load_template, render_template, TemplateContext};

use anyhow::Result;
use songlink_config::AppConfig;
use songlink_infrastructure::open_cache;
use songlink_itunes::ItunesClient;
use songlink_odesli::{BackoffPolicy, OdesliClient};
use std::sync::Arc;
use tracing::info;

/// Wire the production providers and cache from configuration.
pub fn build_pipeline(config: &AppConfig, mode: SelectionMode) -> Result<Pipeline> {
    let catalog = ItunesClient::builder()
        .base_url(config.catalog.base_url.clone())
        .timeout(config.catalog.timeout())
        .country(config.catalog.country.clone())
        .build()?;

    let backoff = BackoffPolicy::new(
        config.resolver.max_attempts,
        config.resolver.initial_backoff(),
        config.resolver.backoff_multiplier,
    )
    .with_transient_statuses(config.resolver.transient_statuses.clone());

    let resolver = OdesliClient::builder()
        .base_url(config.resolver.base_url.clone())
        .timeout(config.resolver.timeout())
        .api_key(config.resolver.api_key.clone())
        .user_country(config.resolver.user_country.clone())
        .backoff(backoff)
        .build()?;

    let cache = open_cache(&config.cache);

    info!(
        target: "pipeline",
        search_limit = config.catalog.search_limit,
        max_attempts = config.resolver.max_attempts,
        "pipeline ready"
    );

    Ok(Pipeline::new(Arc::new(catalog), Arc::new(resolver), cache)
        .with_search_limit(config.catalog.search_limit)
        .with_selection_mode(mode))
}
