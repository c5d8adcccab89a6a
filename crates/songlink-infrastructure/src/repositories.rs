// SPDX-License-Identifier: GPL-3.0-or-later
use songlink_domain::ResolvedLink;

// ============================================================================
// Repository Traits
// ============================================================================

/// Fingerprint → share link store consulted before any network work.
///
/// Implementations never fail outward: unreadable storage behaves as an empty
/// cache and failed writes are logged and dropped.
pub trait ResolutionCache: Send + Sync {
    fn get(&self, fingerprint: &str) -> Option<ResolvedLink>;
    fn put(&self, fingerprint: &str, link: &ResolvedLink);
}
