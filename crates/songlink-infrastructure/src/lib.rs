// SPDX-License-Identifier: GPL-3.0-or-later
pub mod fingerprint;
pub mod json_adapters;
pub mod memory_adapters;
pub mod repositories;

use songlink_config::CacheConfig;
use std::sync::Arc;
use tracing::{info, warn};

pub use fingerprint::{fingerprint, FINGERPRINT_VERSION};
pub use json_adapters::JsonFileCache;
pub use memory_adapters::InMemoryCache;
pub use repositories::ResolutionCache;

/// Open the resolution cache described by the configuration.
///
/// A disabled cache, or a platform without a user cache directory, gets an
/// in-memory cache that lives for the current run only.
pub fn open_cache(config: &CacheConfig) -> Arc<dyn ResolutionCache> {
    if !config.enabled {
        info!(target: "cache", "resolution cache disabled, using in-memory cache");
        return Arc::new(InMemoryCache::default());
    }

    match config.resolved_path() {
        Some(path) => {
            info!(target: "cache", path = %path.display(), "opening resolution cache");
            Arc::new(JsonFileCache::open(path))
        }
        None => {
            warn!(target: "cache", "no user cache directory available, using in-memory cache");
            Arc::new(InMemoryCache::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use songlink_domain::ResolvedLink;

    #[test]
    fn disabled_cache_is_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let config = CacheConfig {
            enabled: false,
            path: Some(path.clone()),
        };

        let cache = open_cache(&config);
        cache.put("key", &ResolvedLink::new("https://song.link/x"));

        assert!(cache.get("key").is_some());
        assert!(!path.exists());
    }

    #[test]
    fn enabled_cache_writes_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cache.json");
        let config = CacheConfig {
            enabled: true,
            path: Some(path.clone()),
        };

        let cache = open_cache(&config);
        cache.put("key", &ResolvedLink::new("https://song.link/x"));

        assert!(path.exists());
    }
}
