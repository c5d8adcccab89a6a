// SPDX-License-Identifier: GPL-3.0-or-later
use crate::repositories::ResolutionCache;
use songlink_domain::ResolvedLink;
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local cache with no persistence.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, ResolvedLink>>,
}

impl InMemoryCache {
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResolutionCache for InMemoryCache {
    fn get(&self, fingerprint: &str) -> Option<ResolvedLink> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(fingerprint)
            .cloned()
    }

    fn put(&self, fingerprint: &str, link: &ResolvedLink) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(fingerprint.to_string(), link.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_overwrites_entries() {
        let cache = InMemoryCache::default();
        assert!(cache.is_empty());
        assert_eq!(cache.get("missing"), None);

        cache.put("key", &ResolvedLink::new("https://song.link/a"));
        cache.put("key", &ResolvedLink::new("https://song.link/b"));

        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get("key"),
            Some(ResolvedLink::new("https://song.link/b"))
        );
    }
}
