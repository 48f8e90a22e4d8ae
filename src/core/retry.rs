//! Bounded exponential backoff for optimistic conditional updates.
//!
//! A lost compare-and-swap always means another writer committed, so the loop makes
//! global progress; the budget only caps how long a single caller keeps trying.

use serde::Deserialize;
use std::time::Duration;

/// Retry budget for conditional updates against a staff row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay after the first conflict; doubles per further conflict
    pub base_delay_ms: u64,
    /// Upper bound for a single delay
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            base_delay_ms: 5,
            max_delay_ms: 200,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given 0-based failed attempt: `base * 2^attempt`, capped.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self
            .base_delay_ms
            .saturating_mul(2_u64.saturating_pow(attempt));
        Duration::from_millis(exp.min(self.max_delay_ms))
    }

    /// Whether another attempt is allowed after `attempt` (0-based) failed.
    #[must_use]
    pub const fn has_attempts_after(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }

    /// Sleeps for the backoff that follows `attempt`.
    pub async fn backoff(&self, attempt: u32) {
        let delay = self.delay_for(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
