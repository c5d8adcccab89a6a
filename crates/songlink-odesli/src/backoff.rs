// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;
use tracing::warn;

/// Statuses that signal a temporary condition on the resolver side.
pub const DEFAULT_TRANSIENT_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Bounded exponential backoff for the resolver.
///
/// `max_attempts` counts every request, including the first. The wait before
/// retry `n` (zero-based) is `initial * multiplier^n`; no wait follows the
/// final attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffPolicy {
    max_attempts: u32,
    initial: Duration,
    multiplier: f64,
    transient_statuses: Vec<u16>,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_millis(800), 1.8)
    }
}

impl BackoffPolicy {
    pub fn new(max_attempts: u32, initial: Duration, multiplier: f64) -> Self {
        let multiplier = if multiplier.is_finite() && multiplier >= 0.0 {
            multiplier
        } else {
            warn!(target: "resolver", multiplier, "invalid backoff multiplier, using 1.0");
            1.0
        };

        Self {
            max_attempts: max_attempts.max(1),
            initial,
            multiplier,
            transient_statuses: DEFAULT_TRANSIENT_STATUSES.to_vec(),
        }
    }

    pub fn with_transient_statuses(mut self, statuses: impl Into<Vec<u16>>) -> Self {
        self.transient_statuses = statuses.into();
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn is_transient(&self, status: u16) -> bool {
        self.transient_statuses.contains(&status)
    }

    /// Waits between consecutive attempts, in order. Yields one fewer item
    /// than `max_attempts`.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let multiplier = self.multiplier;
        std::iter::successors(Some(self.initial.as_secs_f64()), move |secs| {
            Some(secs * multiplier)
        })
        .take(self.max_attempts.saturating_sub(1) as usize)
        .map(|secs| Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
    }

    /// Sum of every wait the policy would perform when all attempts fail.
    pub fn total_delay(&self) -> Duration {
        self.delays().fold(Duration::ZERO, Duration::saturating_add)
    }
}
